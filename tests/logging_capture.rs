use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry, Layer};

use versioned_fs::naming::{NamingOptions, NamingPolicy};

/// Appends written bytes into a shared buffer.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(level: LevelFilter, f: impl FnOnce()) -> String {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer()
        .with_writer(make_writer)
        .with_ansi(false)
        .compact()
        .with_filter(level);
    let dispatch = tracing::Dispatch::new(registry().with(layer));
    tracing::dispatcher::with_default(&dispatch, f);
    let guard = buf.lock().unwrap();
    String::from_utf8_lossy(&guard[..]).into_owned()
}

#[test]
fn exhaustion_is_logged_as_warning() {
    let out = capture(LevelFilter::WARN, || {
        let policy = NamingPolicy::automatic().with_max_renaming_attempts(2);
        let res = policy.resolve(Path::new("/d/a.txt"), 0, |_| false);
        assert!(res.is_exhausted());
    });
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("renaming attempts exhausted"), "{out}");
    assert!(out.contains("a-(2).txt"), "{out}");
}

#[test]
fn conflicting_flags_are_reported() {
    let out = capture(LevelFilter::WARN, || {
        let _ = NamingPolicy::new(
            NamingOptions::VERSION_INSIDE_PARENTHESES | NamingOptions::VERSION_INSIDE_BRACKETS,
            1,
        );
    });
    assert!(out.contains("conflicting naming options"), "{out}");
    assert!(out.contains("brackets"), "{out}");
}

#[test]
fn probes_trace_each_candidate() {
    let out = capture(LevelFilter::TRACE, || {
        NamingPolicy::automatic().resolve(Path::new("/d/a.txt"), 0, |p| p.ends_with("a-(3).txt"));
    });
    assert_eq!(out.matches("probe candidate").count(), 3, "{out}");
    assert!(out.contains("resolved collision with versioned name"), "{out}");
}
