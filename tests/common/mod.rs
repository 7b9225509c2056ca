#![allow(dead_code)]

use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use benchlog::{Failure, StreamSink};
use parking_lot::Mutex;

/// In-memory stream shared between a sink and the test that inspects it.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    data: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.data.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.data.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capture_sink() -> (StreamSink, SharedBuffer) {
    let buffer = SharedBuffer::new();
    (StreamSink::new(buffer.clone()), buffer)
}

/// A capture sink that can be installed with `set_logger`.
pub fn leaked_capture_sink() -> (&'static StreamSink, SharedBuffer) {
    let (sink, buffer) = capture_sink();
    (Box::leak(Box::new(sink)), buffer)
}

/// Runs `f` and returns the `Failure` it raised, if any.
pub fn catch_failure<F: FnOnce()>(f: F) -> Option<Failure> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => Some(
            Failure::from_panic(payload.as_ref())
                .expect("panic was not a benchlog failure")
                .clone(),
        ),
    }
}
