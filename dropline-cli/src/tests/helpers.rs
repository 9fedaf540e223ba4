//! Test helpers for writing stop manifests into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use dropline_core::{SequenceRequest, Stop, StopDetails};
use geo::Coord;
use tempfile::TempDir;

/// Temporary directory exposed as a UTF-8 path.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn write_request(path: &Utf8Path, request: &SequenceRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

/// Three stops east of the equator origin, listed out of visiting order,
/// with order codes that sort them the other way round.
pub(super) fn line_stops() -> Vec<Stop> {
    let stop = |id: &str, code: &str, lng: f64, address: &str| {
        Stop::new(
            id,
            Coord { x: lng, y: 0.0 },
            StopDetails::new(code, "CLIENT", address),
        )
    };
    vec![
        stop("A", "PR03", 1.0, "1 FIRST ST"),
        stop("B", "PR01", 5.0, "5 FIFTH ST"),
        stop("C", "PR02", 2.0, "2 SECOND ST"),
    ]
}
