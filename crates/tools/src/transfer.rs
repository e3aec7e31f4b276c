//! Upload a local file to Telegram as a document or a photo.
//!
//! Each call is one linear pass: validate the path, pick the destination chat
//! (explicit or auto-detected), open the file, upload it once, and report a
//! typed outcome. Nothing is retried and nothing survives between calls
//! except the shared client inside [`ClientProvider`].

use std::{fmt, path::Path, sync::Arc};

use {
    courier_common::PayloadKind,
    courier_telegram::{ChatResolver, ClientProvider, Upload},
    tracing::{debug, info, warn},
};

use crate::{
    error::{Error, Result},
    request::TransferRequest,
};

/// A completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub kind: PayloadKind,
    /// Base name of the uploaded file.
    pub file_name: String,
    pub size_bytes: u64,
    /// Chat id as echoed back by Telegram.
    pub chat_id: String,
    pub message_id: i64,
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} sent successfully!", self.kind.label())?;
        writeln!(f, "File: {}", self.file_name)?;
        if self.kind == PayloadKind::Document {
            writeln!(f, "Size: {} bytes", self.size_bytes)?;
        }
        writeln!(f, "Chat ID: {}", self.chat_id)?;
        write!(f, "Message ID: {}", self.message_id)
    }
}

/// Executes document and photo transfers against the shared Bot API client.
pub struct TransferDispatcher {
    provider: Arc<ClientProvider>,
    resolver: Arc<dyn ChatResolver>,
}

impl TransferDispatcher {
    pub fn new(provider: Arc<ClientProvider>, resolver: Arc<dyn ChatResolver>) -> Self {
        Self { provider, resolver }
    }

    pub async fn send_document(&self, request: TransferRequest) -> Result<Delivery> {
        self.send(PayloadKind::Document, request).await
    }

    pub async fn send_photo(&self, request: TransferRequest) -> Result<Delivery> {
        self.send(PayloadKind::Photo, request).await
    }

    pub async fn send(&self, kind: PayloadKind, request: TransferRequest) -> Result<Delivery> {
        let TransferRequest {
            file_path,
            chat_id,
            caption,
        } = request;
        let path = file_path.ok_or(Error::MissingFilePath)?;

        // Any failure to stat the path reads as "not found".
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|_| Error::FileNotFound { path: path.clone() })?;
        if !metadata.is_file() {
            return Err(Error::NotAFile { path });
        }

        let chat_id = match chat_id {
            Some(chat_id) => chat_id,
            None => {
                let detected = self
                    .resolver
                    .resolve_latest_chat()
                    .await
                    .ok_or(Error::UnresolvedChat)?;
                debug!(chat_id = %detected, "using auto-detected chat id");
                detected
            },
        };

        let client = self.provider.get_client()?;

        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| Error::io(format!("failed to open '{path}'"), e))?;
        let size_bytes = file
            .metadata()
            .await
            .map_err(|e| Error::io(format!("failed to read metadata of '{path}'"), e))?
            .len();
        let file_name = base_name(&path);

        info!(
            %kind,
            path = %path,
            chat_id = %chat_id,
            size_bytes,
            caption_len = caption.len(),
            "telegram upload start"
        );

        let upload = Upload {
            kind,
            file_name: file_name.clone(),
            file,
        };
        let sent = match client.send_upload(&chat_id, upload, &caption).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!(%kind, chat_id = %chat_id, error = %e, "telegram upload failed");
                return Err(e.into());
            },
        };

        info!(
            %kind,
            chat_id = %sent.chat_id,
            message_id = sent.message_id,
            "telegram upload sent"
        );

        Ok(Delivery {
            kind,
            file_name,
            size_bytes,
            chat_id: sent.chat_id,
            message_id: sent.message_id,
        })
    }
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        async_trait::async_trait,
        courier_telegram::{BotApi, InboundUpdate, SentMessage},
        rstest::rstest,
        secrecy::Secret,
        std::{
            io::Write,
            sync::{
                Mutex,
                atomic::{AtomicUsize, Ordering},
            },
        },
        teloxide::{ApiError, RequestError},
        tokio::io::AsyncReadExt,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct RecordedUpload {
        chat_id: String,
        kind: PayloadKind,
        file_name: String,
        caption: String,
        body: Vec<u8>,
    }

    /// Records uploads and replies with a fixed message id, or fails with a Bot API error.
    struct RecordingBot {
        message_id: i64,
        fail: bool,
        uploads: Mutex<Vec<RecordedUpload>>,
    }

    #[async_trait]
    impl BotApi for RecordingBot {
        async fn recent_updates(
            &self,
            _limit: u8,
        ) -> courier_telegram::Result<Vec<InboundUpdate>> {
            Ok(Vec::new())
        }

        async fn send_upload(
            &self,
            chat_id: &str,
            mut upload: Upload,
            caption: &str,
        ) -> courier_telegram::Result<SentMessage> {
            if self.fail {
                return Err(RequestError::Api(ApiError::ChatNotFound).into());
            }
            let mut body = Vec::new();
            upload.file.read_to_end(&mut body).await.unwrap();
            self.uploads.lock().unwrap().push(RecordedUpload {
                chat_id: chat_id.to_string(),
                kind: upload.kind,
                file_name: upload.file_name,
                caption: caption.to_string(),
                body,
            });
            Ok(SentMessage {
                chat_id: chat_id.to_string(),
                message_id: self.message_id,
            })
        }
    }

    struct FixedResolver {
        chat_id: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatResolver for FixedResolver {
        async fn resolve_latest_chat(&self) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.chat_id.clone()
        }
    }

    struct Harness {
        dispatcher: TransferDispatcher,
        bot: Arc<RecordingBot>,
        resolver: Arc<FixedResolver>,
    }

    fn harness(token: Option<&str>, detected: Option<&str>, fail: bool) -> Harness {
        let bot = Arc::new(RecordingBot {
            message_id: 4242,
            fail,
            uploads: Mutex::new(Vec::new()),
        });
        let shared = Arc::clone(&bot);
        let provider = ClientProvider::new(token.map(|t| Secret::new(t.to_string())), move |_| {
            Ok(Arc::clone(&shared) as Arc<dyn BotApi>)
        });
        let resolver = Arc::new(FixedResolver {
            chat_id: detected.map(str::to_string),
            calls: AtomicUsize::new(0),
        });
        Harness {
            dispatcher: TransferDispatcher::new(
                Arc::new(provider),
                Arc::clone(&resolver) as Arc<dyn ChatResolver>,
            ),
            bot,
            resolver,
        }
    }

    fn temp_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("report")
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn request(path: &Path, chat_id: Option<&str>, caption: &str) -> TransferRequest {
        TransferRequest {
            file_path: Some(path.to_string_lossy().into_owned()),
            chat_id: chat_id.map(str::to_string),
            caption: caption.to_string(),
        }
    }

    #[rstest]
    #[case(PayloadKind::Document)]
    #[case(PayloadKind::Photo)]
    #[tokio::test]
    async fn missing_file_path_is_rejected(#[case] kind: PayloadKind) {
        let h = harness(Some("1:abc"), Some("1"), false);
        let err = h
            .dispatcher
            .send(kind, TransferRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingFilePath));
        assert!(err.to_text().starts_with("Error: file_path is required"));
    }

    #[rstest]
    #[case(PayloadKind::Document)]
    #[case(PayloadKind::Photo)]
    #[tokio::test]
    async fn nonexistent_file_is_reported_with_path(#[case] kind: PayloadKind) {
        let h = harness(Some("1:abc"), Some("1"), false);
        let path = "/tmp/courier-does-not-exist-12345.pdf";
        let req = TransferRequest {
            file_path: Some(path.into()),
            ..Default::default()
        };
        let err = h.dispatcher.send(kind, req).await.unwrap_err();
        let text = err.to_text();
        assert!(text.starts_with("Error: File not found:"));
        assert!(text.contains(path));
        assert_eq!(h.resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(Some("1:abc"), None, false);
        let err = h
            .dispatcher
            .send_document(request(dir.path(), Some("1"), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));
    }

    #[tokio::test]
    async fn unresolved_chat_is_reported() {
        let file = temp_file(".pdf", b"%PDF");
        let h = harness(Some("1:abc"), None, false);
        let err = h
            .dispatcher
            .send_document(request(file.path(), None, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedChat));
        assert!(
            err.to_text()
                .starts_with("Error: chat_id not provided and could not auto-detect")
        );
        assert!(h.bot.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn auto_detected_chat_is_used() {
        let file = temp_file(".pdf", b"%PDF-1.7");
        let h = harness(Some("1:abc"), Some("987654"), false);
        let delivery = h
            .dispatcher
            .send_document(request(file.path(), None, ""))
            .await
            .unwrap();
        assert_eq!(delivery.chat_id, "987654");
        assert_eq!(h.resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.bot.uploads.lock().unwrap()[0].chat_id, "987654");
    }

    #[tokio::test]
    async fn explicit_chat_skips_detection() {
        let file = temp_file(".zip", b"PK");
        let h = harness(Some("1:abc"), Some("987654"), false);
        let delivery = h
            .dispatcher
            .send_document(request(file.path(), Some("@releases"), ""))
            .await
            .unwrap();
        assert_eq!(delivery.chat_id, "@releases");
        assert_eq!(h.resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn document_success_reports_name_size_chat_and_message() {
        let contents = b"0123456789abcdef";
        let file = temp_file(".pdf", contents);
        let name = file
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        let h = harness(Some("1:abc"), None, false);

        let delivery = h
            .dispatcher
            .send_document(request(file.path(), Some("555"), "quarterly"))
            .await
            .unwrap();

        assert_eq!(
            delivery,
            Delivery {
                kind: PayloadKind::Document,
                file_name: name.clone(),
                size_bytes: contents.len() as u64,
                chat_id: "555".into(),
                message_id: 4242,
            }
        );
        let text = delivery.to_string();
        assert!(text.starts_with("Document sent successfully!"));
        assert!(text.contains(&format!("File: {name}")));
        assert!(text.contains("Size: 16 bytes"));
        assert!(text.contains("Chat ID: 555"));
        assert!(text.contains("Message ID: 4242"));

        let uploads = h.bot.uploads.lock().unwrap();
        assert_eq!(
            uploads[0],
            RecordedUpload {
                chat_id: "555".into(),
                kind: PayloadKind::Document,
                file_name: name,
                caption: "quarterly".into(),
                body: contents.to_vec(),
            }
        );
    }

    #[tokio::test]
    async fn photo_success_omits_size() {
        let file = temp_file(".png", b"\x89PNG\r\n");
        let h = harness(Some("1:abc"), None, false);
        let delivery = h
            .dispatcher
            .send_photo(request(file.path(), Some("555"), ""))
            .await
            .unwrap();

        let text = delivery.to_string();
        assert!(text.starts_with("Photo sent successfully!"));
        assert!(text.contains(&format!("File: {}", delivery.file_name)));
        assert!(!text.contains("Size:"));
        assert!(text.contains("Chat ID: 555"));
        assert!(text.contains("Message ID: 4242"));
        assert_eq!(h.bot.uploads.lock().unwrap()[0].kind, PayloadKind::Photo);
    }

    #[tokio::test]
    async fn remote_failure_becomes_telegram_error() {
        let file = temp_file(".pdf", b"%PDF");
        let h = harness(Some("1:abc"), None, true);
        let err = h
            .dispatcher
            .send_document(request(file.path(), Some("1"), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Remote(_)));
        assert_eq!(err.to_text(), "Telegram error: Bad Request: chat not found");
    }

    #[tokio::test]
    async fn missing_token_is_reported_on_first_send() {
        let file = temp_file(".pdf", b"%PDF");
        let h = harness(None, None, false);
        let err = h
            .dispatcher
            .send_photo(request(file.path(), Some("1"), ""))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_text(),
            "Error: TELEGRAM_BOT_TOKEN environment variable is required"
        );
    }

    #[test]
    fn base_name_falls_back_to_input() {
        assert_eq!(base_name("/tmp/dir/report.pdf"), "report.pdf");
        assert_eq!(base_name("/"), "/");
    }
}
