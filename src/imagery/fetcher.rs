//! Image sources
//!
//! The engine only needs raw bytes for a locator; where they come from is
//! up to the host.

use super::imagery_data::FetchError;
use crate::constants::imagery::FILE_FETCH_THREADS;
use crate::error::{ArborError, ArborResult};
use futures::executor::ThreadPool;
use futures::future::BoxFuture;
use futures::task::SpawnExt;
use std::path::{Path, PathBuf};

/// Asynchronous byte source for image locators
///
/// Returned futures are polled on the frame thread, so they must not block.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, locator: &str) -> BoxFuture<'static, Result<Vec<u8>, FetchError>>;
}

/// Resolves locators as paths under a root directory
///
/// Reads run on a small private thread pool; the returned future only waits
/// for the result. Remote locators (anything with a `scheme://` prefix) are
/// refused, so a fallback URL fails cleanly and the photo ends on the
/// placeholder.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    pub root: PathBuf,
    pool: ThreadPool,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> ArborResult<Self> {
        let pool = ThreadPool::builder()
            .pool_size(FILE_FETCH_THREADS)
            .name_prefix("arbor-fetch-")
            .create()
            .map_err(|error| ArborError::SpawnFailed {
                task: "file fetch pool".to_string(),
                error: error.to_string(),
            })?;

        Ok(Self {
            root: root.into(),
            pool,
        })
    }
}

impl ImageFetcher for FileFetcher {
    fn fetch(&self, locator: &str) -> BoxFuture<'static, Result<Vec<u8>, FetchError>> {
        let locator = locator.to_string();
        if locator.contains("://") {
            return Box::pin(async move {
                Err(FetchError::Transport {
                    locator,
                    reason: "remote locators are not supported".to_string(),
                })
            });
        }

        let path = self.root.join(&locator);
        let read_locator = locator.clone();
        match self
            .pool
            .spawn_with_handle(async move { read_file(&path, read_locator) })
        {
            Ok(handle) => Box::pin(handle),
            Err(error) => Box::pin(async move {
                Err(FetchError::Transport {
                    locator,
                    reason: error.to_string(),
                })
            }),
        }
    }
}

fn read_file(path: &Path, locator: String) -> Result<Vec<u8>, FetchError> {
    std::fs::read(path).map_err(|error| match error.kind() {
        std::io::ErrorKind::NotFound => FetchError::NotFound { locator },
        _ => FetchError::Transport {
            locator,
            reason: error.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::future::Future;

    #[test]
    fn test_reads_relative_locator() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("3.jpg"), b"bytes").expect("write");

        let fetcher = FileFetcher::new(dir.path()).expect("fetcher");
        let bytes = block_on(fetcher.fetch("3.jpg")).expect("fetch");
        assert_eq!(bytes, b"bytes");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let fetcher = FileFetcher::new(dir.path()).expect("fetcher");
        let result = block_on(fetcher.fetch("nope.jpg"));
        assert_eq!(
            result,
            Err(FetchError::NotFound {
                locator: "nope.jpg".to_string()
            })
        );
    }

    #[test]
    fn test_read_completes_without_an_executor() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("7.jpg"), b"seven").expect("write");
        let fetcher = FileFetcher::new(dir.path()).expect("fetcher");

        // only non-blocking polls from this thread, the way a frame loop drives it
        let mut future = fetcher.fetch("7.jpg");
        let mut context = std::task::Context::from_waker(futures::task::noop_waker_ref());
        let mut result = None;
        for _ in 0..500 {
            if let std::task::Poll::Ready(bytes) = future.as_mut().poll(&mut context) {
                result = Some(bytes);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert_eq!(result, Some(Ok(b"seven".to_vec())));
    }

    #[test]
    fn test_remote_locator_refused() {
        let fetcher = FileFetcher::new(".").expect("fetcher");
        let result = block_on(fetcher.fetch("https://example.org/seed/107/400/500"));
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
