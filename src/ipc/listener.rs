//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and serves one connection at a time.  Each
//! line received is parsed as a JSON-encoded [`Command`]; lines that fail to
//! parse are logged and skipped so a single bad message never drops the
//! connection.
//!
//! # Wire format
//!
//! ```json
//! {"UpdateGrids":[{"id":1,"node":"actor-1"}]}
//! {"ToggleGrid":1}
//! {"ToggleDisplay":"show_infinite_lines"}
//! "Render"
//! ```

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`CommandSource`] that reads JSON commands from a Unix stream socket.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UnixSocketListener {
    /// Create a listener for `path`.  Nothing is bound until
    /// [`run`](CommandSource::run).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse one line.  Blank lines yield `Ok(None)`.
    fn parse_line(text: &str) -> Result<Option<Command>, UnixSocketError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(text)?))
    }
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and serve connections until the sink closes.
    ///
    /// Blocks indefinitely; run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        // A socket file left by a previous run would make bind fail.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    error!("accept error: {}", e);
                    continue;
                }
            };
            debug!("client connected");
            for line in BufReader::new(stream).lines() {
                let text = match line {
                    Ok(text) => text,
                    Err(e) => {
                        error!("read error: {}", e);
                        break;
                    }
                };
                match Self::parse_line(&text) {
                    Ok(Some(cmd)) => {
                        debug!("received {:?}", cmd);
                        if sink.send(cmd).is_err() {
                            info!("sink closed, shutting down");
                            let _ = std::fs::remove_file(&self.path);
                            return Ok(());
                        }
                    }
                    Ok(None) => {}
                    Err(e) => error!("bad command {:?}: {}", text, e),
                }
            }
            debug!("client disconnected");
        }
        Ok(())
    }
}

//  Tests
