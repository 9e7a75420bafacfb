use hub_reader_stdio::StdioSource;
use hub_reader_types::{ConnectionString, EventSource, HubErr, Session, SessionParams};
use std::io::Cursor;

fn params() -> SessionParams {
    let conn: ConnectionString = "stdio://".parse().unwrap();
    SessionParams::new(conn, None)
}

#[tokio::test]
async fn reads_lines_until_eof() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let input = "[0] a\n[1 | 40] b\nplain\r\n[1] c\n";
    let source = StdioSource::from_reader(Cursor::new(input));
    let mut session = source.open(&params()).await?;

    let mut seen = Vec::new();
    while let Some(event) = session.next().await? {
        seen.push((
            event.partition().id().to_owned(),
            event.sequence().unwrap(),
            event.text().into_owned(),
        ));
    }
    assert_eq!(
        seen,
        [
            ("0".to_owned(), 0, "a".to_owned()),
            ("1".to_owned(), 40, "b".to_owned()),
            ("0".to_owned(), 1, "plain".to_owned()),
            ("1".to_owned(), 41, "c".to_owned()),
        ]
    );

    session.close().await?;
    Ok(())
}

#[tokio::test]
async fn close_is_idempotent() -> anyhow::Result<()> {
    let source = StdioSource::from_reader(Cursor::new("x\n"));
    let mut session = source.open(&params()).await?;

    session.close().await?;
    session.close().await?;
    assert!(matches!(session.next().await, Err(HubErr::SessionClosed)));
    Ok(())
}

#[tokio::test]
async fn input_is_consumed_once() -> anyhow::Result<()> {
    let source = StdioSource::from_reader(Cursor::new(""));
    let mut session = source.open(&params()).await?;
    assert!(session.next().await?.is_none());
    assert!(matches!(source.open(&params()).await, Err(HubErr::Connect(_))));
    Ok(())
}

#[tokio::test]
async fn invalid_utf8_lines_are_kept() -> anyhow::Result<()> {
    let input: &[u8] = b"ok\n\xffbad\n[3] \xfe\xff\nafter\n";
    let source = StdioSource::from_reader(Cursor::new(input.to_vec()));
    let mut session = source.open(&params()).await?;

    let mut seen = Vec::new();
    while let Some(event) = session.next().await? {
        seen.push((event.partition().id().to_owned(), event.into_bytes()));
    }
    assert_eq!(
        seen,
        [
            ("0".to_owned(), b"ok".to_vec()),
            ("0".to_owned(), b"\xffbad".to_vec()),
            ("3".to_owned(), b"\xfe\xff".to_vec()),
            ("0".to_owned(), b"after".to_vec()),
        ]
    );

    session.close().await?;
    Ok(())
}
