//! Tracing initialisation for the mkversion binary.
//!
//! Logs always go to stderr: stdout carries the generated header.

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Formatting layer writing plain or JSON lines to `writer`.
fn fmt_layer<S, W>(json: bool, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_target(false).with_writer(writer);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Initialise the global tracing subscriber on stderr.
///
/// `level` applies when `RUST_LOG` is not set. Only the first call in a
/// process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(json, std::io::stderr))
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Sink {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(json: bool) -> String {
        let sink = Sink::default();
        let writer = sink.clone();
        let subscriber =
            tracing_subscriber::registry().with(fmt_layer(json, move || writer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(file = "manifest", "no date record");
        });
        sink.contents()
    }

    #[test]
    fn plain_lines_reach_the_writer() {
        let logged = capture(false);
        assert!(logged.contains("no date record"), "{logged}");
        assert!(logged.contains("manifest"));
    }

    #[test]
    fn json_lines_are_parseable() {
        let logged = capture(true);
        let line: serde_json::Value = serde_json::from_str(logged.trim()).unwrap();
        assert_eq!(line["fields"]["message"], "no date record");
        assert_eq!(line["fields"]["file"], "manifest");
        assert_eq!(line["level"], "WARN");
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
    }
}
