//! Routes `tracing` events into the OBS log.

use std::io;
use std::sync::Once;

use obs_sys as obs;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;
use crate::util::{cstr, to_cstring};

static INIT: Once = Once::new();

pub(crate) fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(BlogMakeWriter)
            .with_ansi(false)
            .without_time()
            .with_level(false)
            .with_target(false)
            .try_init();

        // Another plugin in this process may already own the global subscriber.
        if installed.is_err() {
            emit(obs::LOG_INFO as i32, b"tracing subscriber already set; using it");
        }
    });
}

fn blog_level(level: &Level) -> i32 {
    let level = match *level {
        Level::ERROR => obs::LOG_ERROR,
        Level::WARN => obs::LOG_WARNING,
        Level::INFO => obs::LOG_INFO,
        Level::DEBUG | Level::TRACE => obs::LOG_DEBUG,
    };
    level as i32
}

fn emit(level: i32, line: &[u8]) {
    let text = String::from_utf8_lossy(line);
    let text = text.trim_end();
    if text.is_empty() {
        return;
    }
    let msg = to_cstring(text);
    unsafe {
        obs::blog(level, cstr(b"[BackgroundKey] %s\0"), msg.as_ptr());
    }
}

struct BlogMakeWriter;

impl<'a> MakeWriter<'a> for BlogMakeWriter {
    type Writer = BlogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BlogWriter::new(obs::LOG_INFO as i32)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        BlogWriter::new(blog_level(meta.level()))
    }
}

/// Buffers one formatted event and hands it to `blog` when dropped.
struct BlogWriter {
    level: i32,
    buf: Vec<u8>,
}

impl BlogWriter {
    fn new(level: i32) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(128),
        }
    }
}

impl io::Write for BlogWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for BlogWriter {
    fn drop(&mut self) {
        emit(self.level, &self.buf);
    }
}
