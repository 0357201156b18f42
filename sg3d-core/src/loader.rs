/// Asynchronous model-file loading off the render loop
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{bounded, Receiver, TryRecvError};

use crate::error::LoadError;
use crate::obj::{parse_obj, ModelData};

/// Observed state of an in-flight load.
#[derive(Debug)]
pub enum LoadStatus {
    /// The worker has not finished yet; poll again next frame.
    Pending,
    /// The model data is ready; this is returned exactly once.
    Ready(ModelData),
    /// The load failed. Logged when first observed; permanent.
    Failed,
}

/// Handle to a model file being read and parsed on a worker thread.
///
/// There is no cancellation and no automatic retry: a failed load
/// resolves to [`LoadStatus::Failed`] and the scene carries on without
/// the object.
pub struct PendingModel {
    source: PathBuf,
    receiver: Receiver<Result<ModelData, LoadError>>,
    failed: bool,
}

impl PendingModel {
    /// Non-blocking check for completion, intended to be called once per
    /// frame until it stops returning [`LoadStatus::Pending`].
    pub fn poll(&mut self) -> LoadStatus {
        if self.failed {
            return LoadStatus::Failed;
        }
        match self.receiver.try_recv() {
            Ok(Ok(data)) => LoadStatus::Ready(data),
            Ok(Err(error)) => {
                log::error!("failed to load model {}: {}", self.source.display(), error);
                self.failed = true;
                LoadStatus::Failed
            }
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                log::error!(
                    "failed to load model {}: {}",
                    self.source.display(),
                    LoadError::Worker
                );
                self.failed = true;
                LoadStatus::Failed
            }
        }
    }

    /// Block until the load resolves. For callers without a frame loop.
    pub fn wait(self) -> Result<ModelData, LoadError> {
        self.receiver.recv().unwrap_or(Err(LoadError::Worker))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Start loading an OBJ file on a worker thread.
pub fn load_obj(path: impl Into<PathBuf>) -> PendingModel {
    let source = path.into();
    let (sender, receiver) = bounded(1);
    let worker_path = source.clone();
    thread::spawn(move || {
        let result = std::fs::read_to_string(&worker_path)
            .map_err(LoadError::from)
            .and_then(|text| parse_obj(&text));
        // The owner may have been dropped; nothing to do then.
        let _ = sender.send(result);
    });
    PendingModel {
        source,
        receiver,
        failed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_resolves_to_model_data() {
        let path = temp_obj(
            "sg3d_loader_ok.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );
        let data = load_obj(&path).wait().unwrap();
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.triangle_count(), 1);
    }

    #[test]
    fn test_missing_file_fails_without_panicking() {
        let result = load_obj("/nonexistent/sg3d/model.obj").wait();
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_poll_reaches_terminal_state() {
        let path = temp_obj("sg3d_loader_empty.obj", "");
        let mut pending = load_obj(&path);
        // Spin until the worker resolves; an empty file is a parse error.
        loop {
            match pending.poll() {
                LoadStatus::Pending => std::thread::yield_now(),
                LoadStatus::Ready(_) => panic!("empty file should not produce a model"),
                LoadStatus::Failed => break,
            }
        }
        // Failure is permanent.
        assert!(matches!(pending.poll(), LoadStatus::Failed));
    }
}
