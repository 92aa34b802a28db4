//! The JSON-lines adapter driving an engine through the tokio reactor

use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};

use asr_ime_bridge::adapter::{self, LineHost};
use asr_ime_bridge::events::HostOutput;
use asr_ime_bridge::lifecycle::ShutdownSignal;
use asr_ime_bridge::{Config, Engine};

/// Writer whose contents stay reachable after the engine takes it
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn outputs(&self) -> Vec<HostOutput> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn config(dir: &tempfile::TempDir) -> Config {
    Config::with_paths(dir.path().join("cmd.fifo"), dir.path().join("commit.fifo"))
}

#[tokio::test]
async fn test_dispatch_lines() {
    let dir = tempfile::tempdir().unwrap();
    let out = SharedBuf::default();
    let engine = Engine::new(&config(&dir), LineHost::new(out.clone())).unwrap();

    adapter::dispatch_line(&engine, r#"{"type":"activate","context":3}"#);
    assert_eq!(engine.focus(), Some(3));

    adapter::dispatch_line(&engine, "not json");
    adapter::dispatch_line(&engine, r#"{"type":"key","context":4,"key":"nonsense-key"}"#);
    adapter::dispatch_line(&engine, r#"{"type":"key","context":4,"key":"a"}"#);
    adapter::dispatch_line(&engine, r#"{"type":"key","context":4,"key":"F8","release":true}"#);
    adapter::dispatch_line(&engine, r#"{"type":"key","context":4,"key":"ctrl+alt+v"}"#);
    adapter::dispatch_line(&engine, r#"{"type":"deactivate","context":4}"#);
    adapter::dispatch_line(&engine, r#"{"type":"reset","context":4}"#);

    assert_eq!(engine.focus(), None);
    assert_eq!(
        out.outputs(),
        vec![
            HostOutput::KeyResult {
                context: 4,
                key: "nonsense-key".into(),
                consumed: false,
            },
            HostOutput::KeyResult {
                context: 4,
                key: "a".into(),
                consumed: false,
            },
            HostOutput::KeyResult {
                context: 4,
                key: "F8".into(),
                consumed: false,
            },
            HostOutput::KeyResult {
                context: 4,
                key: "Control+Alt+v".into(),
                consumed: true,
            },
        ]
    );
}

#[tokio::test]
async fn test_run_commits_from_fifo() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let out = SharedBuf::default();
    let mut engine = Engine::new(&config, LineHost::new(out.clone())).unwrap();
    let mut shutdown = ShutdownSignal::new().unwrap();

    let (mut client, server) = tokio::io::duplex(1024);
    let commit_fifo = config.commit_fifo.clone();

    let driver = async move {
        client
            .write_all(b"{\"type\":\"activate\",\"context\":7}\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut recognizer = std::fs::OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&commit_fifo)
            .unwrap();
        recognizer.write_all(b"hel").unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        recognizer.write_all(b"lo\r\nworld\n").unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Closing host input ends the loop
        drop(client);
    };

    let (result, ()) = tokio::join!(
        adapter::run(&mut engine, BufReader::new(server), &mut shutdown),
        driver
    );
    result.unwrap();

    assert_eq!(
        out.outputs(),
        vec![
            HostOutput::Commit {
                context: 7,
                text: "hello".into(),
            },
            HostOutput::Commit {
                context: 7,
                text: "world".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_run_until_input_closes() {
    let dir = tempfile::tempdir().unwrap();
    let out = SharedBuf::default();
    let mut engine = Engine::new(&config(&dir), LineHost::new(out.clone())).unwrap();
    let mut shutdown = ShutdownSignal::new().unwrap();

    let input = tokio_test::io::Builder::new()
        .read(b"{\"type\":\"activate\",\"context\":1}\n")
        .read(b"{\"type\":\"key\",\"context\":2,\"key\":\"Shift+F8\"}\n")
        .build();

    adapter::run(&mut engine, BufReader::new(input), &mut shutdown)
        .await
        .unwrap();

    assert_eq!(engine.focus(), Some(2));
    assert_eq!(
        out.outputs(),
        vec![HostOutput::KeyResult {
            context: 2,
            key: "Shift+F8".into(),
            consumed: true,
        }]
    );
}
