// Requires a broker: BROKERS_URL=localhost:9092 cargo test --test consume --features=test
#[cfg(feature = "test")]
#[tokio::test]
async fn main() -> anyhow::Result<()> {
    use hub_reader_kafka::{export::rdkafka, KafkaSource};
    use hub_reader_types::{ConnectionString, EventSource, HubErr, Session, SessionParams};
    use rdkafka::{
        producer::{FutureProducer, FutureRecord},
        ClientConfig,
    };
    use std::time::Duration;

    let _ = env_logger::try_init();

    let brokers = std::env::var("BROKERS_URL").unwrap_or_else(|_| "localhost:9092".to_owned());
    let topic = format!(
        "hub-reader-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_secs()
    );

    let producer: FutureProducer = ClientConfig::new()
        .set("bootstrap.servers", &brokers)
        .create()?;
    for i in 0..10 {
        let payload = format!("{i}");
        producer
            .send(
                FutureRecord::<(), _>::to(&topic).payload(&payload),
                Duration::from_secs(10),
            )
            .await
            .map_err(|(e, _)| e)?;
    }

    let conn: ConnectionString = format!("kafka://{brokers}/{topic}").parse()?;
    let source = KafkaSource::default();
    let mut session = source.open(&SessionParams::new(conn, None)).await?;

    let mut seen = Vec::new();
    while seen.len() < 10 {
        let event = session.next().await?.expect("Kafka stream never ends");
        seen.push(event.as_str()?.parse::<usize>()?);
    }
    seen.sort();
    assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    session.close().await?;
    session.close().await?;
    assert!(matches!(session.next().await, Err(HubErr::SessionClosed)));

    Ok(())
}
