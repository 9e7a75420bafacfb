use rdkafka::util::AsyncRuntime;
use std::{future::Future, pin::Pin, time::Duration};

#[derive(Debug)]
/// Drives rdkafka's wakers and timers on async-std.
pub struct AsyncStdRuntime;

impl AsyncRuntime for AsyncStdRuntime {
    type Delay = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn spawn<T>(task: T)
    where
        T: Future<Output = ()> + Send + 'static,
    {
        async_std::task::spawn(task);
    }

    fn delay_for(duration: Duration) -> Self::Delay {
        Box::pin(async_std::task::sleep(duration))
    }
}
