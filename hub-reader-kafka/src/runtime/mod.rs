//! The runtime librdkafka's async wrapper spawns its wakers on, following `hub-reader-runtime`.

#[cfg(feature = "runtime-tokio")]
pub use rdkafka::util::TokioRuntime as KafkaAsyncRuntime;

#[cfg(all(feature = "runtime-async-std", not(feature = "runtime-tokio")))]
mod async_std_impl;
#[cfg(all(feature = "runtime-async-std", not(feature = "runtime-tokio")))]
pub use async_std_impl::AsyncStdRuntime as KafkaAsyncRuntime;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
mod no_rt;
#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
pub use no_rt::NoRuntime as KafkaAsyncRuntime;

use rdkafka::consumer::{DefaultConsumerContext, StreamConsumer};

/// The librdkafka consumer every session reads from.
pub type RawConsumer = StreamConsumer<DefaultConsumerContext, KafkaAsyncRuntime>;

#[cfg(test)]
mod test {
    use super::*;
    use rdkafka::{util::AsyncRuntime, ClientConfig};
    use std::time::Duration;

    #[test]
    fn test_consumer_on_selected_runtime() {
        // creating a client does not contact the brokers
        let client: Result<RawConsumer, _> = ClientConfig::new()
            .set("bootstrap.servers", "localhost:9092")
            .set("group.id", "$Default")
            .create();
        assert!(client.is_ok());
    }

    #[cfg(all(feature = "runtime-async-std", not(feature = "runtime-tokio")))]
    #[test]
    fn test_async_std_delay() {
        async_std::task::block_on(async {
            let start = std::time::Instant::now();
            KafkaAsyncRuntime::delay_for(Duration::from_millis(20)).await;
            assert!(start.elapsed() >= Duration::from_millis(20));
        });
    }

    #[cfg(all(feature = "runtime-tokio", feature = "test"))]
    #[tokio::test]
    async fn test_tokio_delay() {
        let start = std::time::Instant::now();
        KafkaAsyncRuntime::delay_for(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
