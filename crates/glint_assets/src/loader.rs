use std::path::PathBuf;
use std::time::Duration;

use tokio::runtime::Handle as TokioHandle;
use tokio::sync::mpsc::UnboundedSender;

use crate::{AssetError, typeface::Typeface};

/// How often a failed fetch is retried before giving up.
const FETCH_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Completion message delivered back to the frame loop. Exactly one of
/// these ever arrives per `FontLoader::load` call.
pub enum AssetMessage {
    FontLoaded(Typeface),
    FontFailed(AssetError),
}

#[derive(Debug, Clone)]
pub enum FontSource {
    Url(String),
    File(PathBuf),
}

/// Hands font requests to the IO runtime and reports back over a channel
/// that the frame loop drains at the frame boundary.
#[derive(Clone)]
pub struct FontLoader {
    event_sender: UnboundedSender<AssetMessage>,
    // The "Ticket" to the Async World
    io_handle: TokioHandle,
}

impl FontLoader {
    pub fn new(event_sender: UnboundedSender<AssetMessage>, io_handle: TokioHandle) -> Self {
        Self {
            event_sender,
            io_handle,
        }
    }

    /// Starts the one-shot fetch. Non-blocking; works from any thread.
    pub fn load(&self, source: FontSource) {
        let sender = self.event_sender.clone();

        self.io_handle.spawn(async move {
            log::info!("[FontLoader] loading {source:?}");

            let message = match load_typeface(&source).await {
                Ok(font) => {
                    log::info!(
                        "[FontLoader] loaded '{}' with {} glyphs",
                        font.family_name,
                        font.glyphs.len()
                    );
                    AssetMessage::FontLoaded(font)
                }
                Err(err) => AssetMessage::FontFailed(err),
            };

            // The receiver only disappears when the window is closing.
            let _ = sender.send(message);
        });
    }
}

async fn load_typeface(source: &FontSource) -> Result<Typeface, AssetError> {
    let json = match source {
        FontSource::Url(url) => fetch_with_retry(url).await?,
        FontSource::File(path) => tokio::fs::read_to_string(path).await?,
    };
    Typeface::from_json(&json)
}

async fn fetch_with_retry(url: &str) -> Result<String, AssetError> {
    let mut last_error = String::new();

    for attempt in 1..=FETCH_ATTEMPTS {
        match fetch_once(url).await {
            Ok(body) => return Ok(body),
            Err(err) => {
                log::warn!("[FontLoader] attempt {attempt}/{FETCH_ATTEMPTS} failed: {err}");
                last_error = err.to_string();
            }
        }
        if attempt < FETCH_ATTEMPTS {
            tokio::time::sleep(RETRY_BACKOFF).await;
        }
    }

    Err(AssetError::Fetch {
        attempts: FETCH_ATTEMPTS,
        reason: last_error,
    })
}

async fn fetch_once(url: &str) -> Result<String, reqwest::Error> {
    reqwest::get(url).await?.error_for_status()?.text().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn missing_file_reports_a_recoverable_failure() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (tx, mut rx) = unbounded_channel();

        let loader = FontLoader::new(tx, runtime.handle().clone());
        loader.load(FontSource::File(PathBuf::from("/no/such/typeface.json")));

        let message = runtime.block_on(rx.recv()).expect("one message");
        match message {
            AssetMessage::FontFailed(err) => assert!(err.is_recoverable()),
            AssetMessage::FontLoaded(_) => panic!("load should have failed"),
        }
    }

    #[test]
    fn local_typeface_round_trips_through_the_loader() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (tx, mut rx) = unbounded_channel();

        let dir = std::env::temp_dir();
        let path = dir.join("glint_loader_test_typeface.json");
        std::fs::write(
            &path,
            r#"{"familyName":"T","resolution":1000,"glyphs":{"N":{"ha":700,"o":"m 0 0 l 700 0 l 700 700"}}}"#,
        )
        .unwrap();

        let loader = FontLoader::new(tx, runtime.handle().clone());
        loader.load(FontSource::File(path.clone()));

        let message = runtime.block_on(rx.recv()).expect("one message");
        std::fs::remove_file(&path).ok();
        match message {
            AssetMessage::FontLoaded(font) => {
                assert!(font.glyph('N').is_ok());
            }
            AssetMessage::FontFailed(err) => panic!("unexpected failure: {err}"),
        }
    }
}
