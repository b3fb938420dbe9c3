//! Output sinks for decoded payloads.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Destination for decoded acknowledge payloads.
pub trait PayloadSink: Send + Sync {
    fn emit(&self, payload: &[u8]) -> io::Result<()>;
}

/// Writes each payload to standard output, one per line.
///
/// Logging goes to stderr, so stdout carries nothing but payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl PayloadSink for StdoutSink {
    fn emit(&self, payload: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(payload)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// Keeps every payload in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    payloads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the payloads emitted so far.
    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.payloads
            .lock()
            .map(|p| p.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl PayloadSink for MemorySink {
    fn emit(&self, payload: &[u8]) -> io::Result<()> {
        self.payloads
            .lock()
            .map_err(|_| io::Error::other("memory sink poisoned"))?
            .push(payload.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.emit(b"first").unwrap();
        sink.emit(b"").unwrap();
        sink.emit(b"third").unwrap();

        assert_eq!(
            sink.payloads(),
            vec![b"first".to_vec(), Vec::new(), b"third".to_vec()]
        );
    }

    #[test]
    fn test_memory_sink_clones_share_storage() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        handle.emit(b"shared").unwrap();

        assert_eq!(sink.payloads(), vec![b"shared".to_vec()]);
    }

    #[test]
    fn test_memory_sink_poisoned_reports_io_error() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        let _ = std::thread::spawn(move || {
            let _held = handle.payloads.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = sink.emit(b"late").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(sink.payloads(), Vec::<Vec<u8>>::new());
    }

    #[test]
    fn test_stdout_sink_accepts_binary() {
        assert!(StdoutSink.emit(&[0x00, 0xff, b'\n']).is_ok());
    }
}
