use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

pub fn add_layer<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span> + Send + Sync
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
{
    match tracing_journald::layer() {
        Ok(layer) => subscriber.with(Some(layer)),
        Err(err) => {
            eprintln!("Couldn't setup journald-logger, is journald running? {err}");
            subscriber.with(None)
        }
    }
}
