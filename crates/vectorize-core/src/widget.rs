//! The upload state machine.
//!
//! [`UploadWidget`] owns a single [`UploadState`] value and a generation
//! counter. Every asynchronous step is split into a `begin`/`complete`
//! pair connected by a ticket: the widget hands out a ticket when work
//! starts and only accepts the completion carrying the newest one.
//! Selecting another file or starting another upload makes every older
//! ticket stale, so a late file read or a superseded network response
//! can never overwrite what the user is looking at.
//!
//! ```text
//! Idle ──select──▶ Reading ──read ok──▶ Ready ──begin_upload──▶ Loading
//!                     │                                           │
//!                     └──read err──▶ Failed ◀──error / no svg─────┤
//!                                                                 ▼
//!                                                              Success
//! ```
//!
//! Any state re-enters `Reading` on a new selection. `Ready`, `Success`,
//! and `Failed` (with an image) accept another `begin_upload`. A submit
//! during `Reading` is rejected and shown as an error, but the read
//! still completes.

use crate::client::{ClientError, GraphqlClient};
use crate::encode;
use crate::graphql::{UploadImageData, UploadImageVariables};
use crate::types::{
    EncodedPayload, FileReadError, LoadedImage, PreviewUrl, SelectedFile, UiStatus, UploadError,
    UploadResult,
};

/// Default filename for downloaded results.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "generated_image.svg";

/// MIME type of downloaded results.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Every reachable widget state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A file was chosen and its bytes are being read.
    ///
    /// `error` holds a submit rejected before the read finished; the
    /// read itself stays pending and clears it.
    Reading {
        file_name: String,
        error: Option<UploadError>,
    },
    /// A file is loaded and can be submitted.
    Ready { image: LoadedImage },
    /// An upload request is in flight.
    Loading { image: LoadedImage },
    /// The service returned SVG markup.
    Success {
        image: LoadedImage,
        result: UploadResult,
    },
    /// The last step failed. `image` survives remote failures so the
    /// user can resubmit without reselecting.
    Failed {
        image: Option<LoadedImage>,
        error: UploadError,
    },
}

/// Identifies one file read started by [`UploadWidget::select_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

/// Identifies one upload started by [`UploadWidget::begin_upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Whether a completion changed the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer selection or upload superseded this one.
    Stale,
}

/// One outbound `uploadImage` call, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub ticket: UploadTicket,
    pub variables: UploadImageVariables,
}

impl UploadRequest {
    /// Send the request through `client`.
    ///
    /// The widget is not borrowed while the request is in flight; feed
    /// the returned [`UploadResponse`] to
    /// [`UploadWidget::complete_upload`] afterwards.
    #[allow(clippy::future_not_send)] // browser clients are !Send
    pub async fn send<C: GraphqlClient>(self, client: &C) -> UploadResponse {
        let outcome = client.upload_image(&self.variables).await;
        UploadResponse {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// The result of sending an [`UploadRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub ticket: UploadTicket,
    pub outcome: Result<UploadImageData, ClientError>,
}

/// An SVG file to hand to a download or save routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgArtifact<'a> {
    pub filename: &'a str,
    pub mime_type: &'a str,
    pub contents: &'a str,
}

/// Stateful controller for one image-to-SVG upload widget.
#[derive(Debug, Default)]
pub struct UploadWidget {
    state: UploadState,
    generation: u64,
}

impl UploadWidget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &UploadState {
        &self.state
    }

    /// Collapse the state into the four user-facing statuses.
    #[must_use]
    pub fn status(&self) -> UiStatus {
        match &self.state {
            UploadState::Idle
            | UploadState::Reading { error: None, .. }
            | UploadState::Ready { .. } => UiStatus::Idle,
            UploadState::Loading { .. } => UiStatus::Loading,
            UploadState::Success { .. } => UiStatus::Success,
            UploadState::Reading {
                error: Some(error), ..
            }
            | UploadState::Failed { error, .. } => UiStatus::Error(error.to_string()),
        }
    }

    /// The loaded image, if one survives in the current state.
    #[must_use]
    pub const fn image(&self) -> Option<&LoadedImage> {
        match &self.state {
            UploadState::Ready { image }
            | UploadState::Loading { image }
            | UploadState::Success { image, .. }
            | UploadState::Failed {
                image: Some(image), ..
            } => Some(image),
            UploadState::Idle
            | UploadState::Reading { .. }
            | UploadState::Failed { image: None, .. } => None,
        }
    }

    #[must_use]
    pub fn file(&self) -> Option<&SelectedFile> {
        self.image().map(|image| &image.file)
    }

    /// Name of the most recently selected file, including one still
    /// being read or one that failed to read.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match &self.state {
            UploadState::Reading { file_name, .. } => Some(file_name.as_str()),
            UploadState::Failed {
                image: None,
                error: UploadError::FileRead { name, .. } | UploadError::UnsupportedFormat { name },
            } => Some(name.as_str()),
            _ => self.file().map(|file| file.name.as_str()),
        }
    }

    #[must_use]
    pub fn payload(&self) -> Option<&EncodedPayload> {
        self.image().map(|image| &image.payload)
    }

    #[must_use]
    pub fn preview(&self) -> Option<&PreviewUrl> {
        self.image().map(|image| &image.preview)
    }

    #[must_use]
    pub const fn result(&self) -> Option<&UploadResult> {
        match &self.state {
            UploadState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&UploadError> {
        match &self.state {
            UploadState::Reading {
                error: Some(error), ..
            }
            | UploadState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, UploadState::Loading { .. })
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.payload().is_some_and(|p| !p.is_empty())
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Start selecting a new file.
    ///
    /// Discards the previous image, result, and error, and invalidates
    /// any outstanding read or upload.
    pub fn select_file(&mut self, file_name: impl Into<String>) -> ReadTicket {
        let file_name = file_name.into();
        tracing::info!(file = %file_name, "file selected");
        self.state = UploadState::Reading {
            file_name,
            error: None,
        };
        ReadTicket(self.next_generation())
    }

    /// Return to `Idle`, e.g. when the picker was cancelled.
    pub fn clear_selection(&mut self) {
        self.next_generation();
        self.state = UploadState::Idle;
    }

    /// Finish the read started by [`select_file`](Self::select_file).
    pub fn complete_read(
        &mut self,
        ticket: ReadTicket,
        outcome: Result<Vec<u8>, FileReadError>,
    ) -> Completion {
        if ticket.0 != self.generation {
            tracing::warn!(ticket = ticket.0, current = self.generation, "discarding stale file read");
            return Completion::Stale;
        }
        let UploadState::Reading {
            file_name: name, ..
        } = &self.state
        else {
            return Completion::Stale;
        };
        let name = name.clone();

        self.state = match outcome.map_err(|source| UploadError::FileRead {
            name: name.clone(),
            source,
        }) {
            Ok(bytes) => match encode::load_image(&name, &bytes) {
                Ok(image) => UploadState::Ready { image },
                Err(error) => {
                    tracing::error!(file = %name, %error, "rejected selected file");
                    UploadState::Failed { image: None, error }
                }
            },
            Err(error) => {
                tracing::error!(file = %name, error = ?error, "file read failed");
                UploadState::Failed { image: None, error }
            }
        };
        Completion::Applied
    }

    /// Begin an upload of the currently loaded image.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Validation`] when no image is loaded and
    /// records it as the visible error. A pending read keeps running and
    /// replaces the error when it completes. Returns
    /// [`UploadError::Busy`] while `Loading`. No request is produced in
    /// either case.
    pub fn begin_upload(&mut self) -> Result<UploadRequest, UploadError> {
        let image = match std::mem::take(&mut self.state) {
            UploadState::Ready { image }
            | UploadState::Success { image, .. }
            | UploadState::Failed {
                image: Some(image), ..
            } => image,
            UploadState::Loading { image } => {
                self.state = UploadState::Loading { image };
                return Err(UploadError::Busy);
            }
            UploadState::Reading { file_name, .. } => {
                tracing::warn!(file = %file_name, "upload requested before the selected file finished reading");
                self.state = UploadState::Reading {
                    file_name,
                    error: Some(UploadError::Validation),
                };
                return Err(UploadError::Validation);
            }
            UploadState::Idle | UploadState::Failed { image: None, .. } => {
                tracing::warn!("upload requested with no image selected");
                self.state = UploadState::Failed {
                    image: None,
                    error: UploadError::Validation,
                };
                return Err(UploadError::Validation);
            }
        };

        let variables = UploadImageVariables {
            image_data: image.payload.as_str().to_owned(),
        };
        tracing::info!(file = %image.file.name, bytes = image.file.size, "uploading image");
        self.state = UploadState::Loading { image };
        Ok(UploadRequest {
            ticket: UploadTicket(self.next_generation()),
            variables,
        })
    }

    /// Apply the response of the request started by
    /// [`begin_upload`](Self::begin_upload).
    pub fn complete_upload(&mut self, response: UploadResponse) -> Completion {
        if response.ticket.0 != self.generation {
            tracing::warn!(
                ticket = response.ticket.0,
                current = self.generation,
                "discarding stale upload response"
            );
            return Completion::Stale;
        }
        let image = match std::mem::take(&mut self.state) {
            UploadState::Loading { image } => image,
            other => {
                self.state = other;
                return Completion::Stale;
            }
        };

        self.state = match response.outcome {
            Ok(UploadImageData {
                id,
                svg_code: Some(svg_code),
            }) if !svg_code.is_empty() => {
                tracing::info!(bytes = svg_code.len(), "SVG received");
                UploadState::Success {
                    image,
                    result: UploadResult {
                        id: id.unwrap_or_default(),
                        svg_code,
                    },
                }
            }
            Ok(_) => {
                tracing::error!("upload response carried no svgCode");
                UploadState::Failed {
                    image: Some(image),
                    error: UploadError::MalformedResponse,
                }
            }
            Err(error) => {
                tracing::error!(%error, "GraphQL upload failed");
                UploadState::Failed {
                    image: Some(image),
                    error: UploadError::Remote(error),
                }
            }
        };
        Completion::Applied
    }

    /// Run a whole upload against `client`.
    ///
    /// Only suitable when the caller can hold `&mut self` across the
    /// request, as the CLI does. UI code should use
    /// [`begin_upload`](Self::begin_upload) and
    /// [`complete_upload`](Self::complete_upload) around its own await.
    ///
    /// # Errors
    ///
    /// Returns the [`UploadError`] the widget ended up in.
    #[allow(clippy::future_not_send)]
    pub async fn submit_upload<C: GraphqlClient>(
        &mut self,
        client: &C,
    ) -> Result<&UploadResult, UploadError> {
        let request = self.begin_upload()?;
        let response = request.send(client).await;
        self.complete_upload(response);
        match &self.state {
            UploadState::Success { result, .. } => Ok(result),
            UploadState::Failed { error, .. } => Err(error.clone()),
            _ => Err(UploadError::Validation),
        }
    }

    /// The downloadable artifact for the current result.
    ///
    /// `None` when there is nothing to download.
    #[must_use]
    pub fn svg_artifact(&self) -> Option<SvgArtifact<'_>> {
        self.result().map(|result| SvgArtifact {
            filename: DEFAULT_DOWNLOAD_FILENAME,
            mime_type: SVG_MIME_TYPE,
            contents: &result.svg_code,
        })
    }
}
