use syslog_tracing::{Facility, Options, Syslog};
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan};

const IDENTITY: &std::ffi::CStr = c"maxspace";

pub fn add_layer<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span> + Send + Sync
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
{
    let layer = Syslog::new(IDENTITY, Options::default(), Facility::default())
        .map(|writer| tracing_subscriber::fmt::layer().with_writer(writer));
    if layer.is_none() {
        eprintln!("Couldn't setup syslog-logger, another one is open already.");
    }
    subscriber.with(layer)
}
