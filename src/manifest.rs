use serde::Deserialize;

use crate::error::{InspectError, Result};

pub const INDEX_JSON: &str = "index.json";

const BLOBS_DIR: &str = "blobs/sha256";
const DIGEST_PREFIX: &str = "sha256:";

/// A content descriptor as it appears in index.json and manifests.
/// Only the digest is needed to locate a blob.
#[derive(Debug, Clone, Deserialize)]
pub struct Descriptor {
    pub digest: String,
}

/// OCI image index (index.json)
#[derive(Debug, Deserialize)]
pub struct Index {
    #[serde(default)]
    pub manifests: Vec<Descriptor>,
}

/// OCI image manifest, reduced to its layer list
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub layers: Vec<Descriptor>,
}

impl Index {
    /// Digest of the manifest to inspect. Buildpackages carry a single
    /// manifest, so anything past the first entry is ignored.
    pub fn first_manifest(&self) -> Result<&str> {
        self.manifests
            .first()
            .map(|descriptor| descriptor.digest.as_str())
            .ok_or(InspectError::EmptyIndex)
    }
}

/// Parse index.json
pub fn parse_index(bytes: &[u8]) -> Result<Index> {
    serde_json::from_slice(bytes).map_err(|source| InspectError::Json {
        file: INDEX_JSON.to_string(),
        source,
    })
}

/// Parse a manifest blob. `file` names the blob in error messages.
pub fn parse_manifest(bytes: &[u8], file: &str) -> Result<Manifest> {
    serde_json::from_slice(bytes).map_err(|source| InspectError::Json {
        file: file.to_string(),
        source,
    })
}

/// Map a digest to its blob path inside the archive
/// Example: "sha256:abc123" -> "blobs/sha256/abc123"
pub fn blob_path(digest: &str) -> String {
    let hex = digest.strip_prefix(DIGEST_PREFIX).unwrap_or(digest);
    format!("{}/{}", BLOBS_DIR, hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        let index_json = r#"{
            "schemaVersion": 2,
            "manifests": [
                {
                    "mediaType": "application/vnd.oci.image.manifest.v1+json",
                    "digest": "sha256:aaaa",
                    "size": 1083
                },
                {
                    "mediaType": "application/vnd.oci.image.manifest.v1+json",
                    "digest": "sha256:bbbb",
                    "size": 1083
                }
            ]
        }"#;

        let index = parse_index(index_json.as_bytes()).unwrap();
        assert_eq!(index.manifests.len(), 2);
        assert_eq!(index.first_manifest().unwrap(), "sha256:aaaa");
    }

    #[test]
    fn test_empty_index() {
        let index = parse_index(br#"{"schemaVersion": 2, "manifests": []}"#).unwrap();
        assert!(matches!(
            index.first_manifest(),
            Err(InspectError::EmptyIndex)
        ));

        let index = parse_index(br#"{"schemaVersion": 2}"#).unwrap();
        assert!(index.first_manifest().is_err());
    }

    #[test]
    fn test_parse_manifest() {
        let manifest_json = r#"{
            "schemaVersion": 2,
            "config": {
                "mediaType": "application/vnd.oci.image.config.v1+json",
                "digest": "sha256:cccc",
                "size": 512
            },
            "layers": [
                {"mediaType": "application/vnd.oci.image.layer.v1.tar+gzip", "digest": "sha256:1111"},
                {"mediaType": "application/vnd.oci.image.layer.v1.tar+gzip", "digest": "sha256:2222"},
                {"mediaType": "application/vnd.oci.image.layer.v1.tar+gzip", "digest": "sha256:3333"}
            ]
        }"#;

        let manifest = parse_manifest(manifest_json.as_bytes(), "blobs/sha256/aaaa").unwrap();
        let digests: Vec<&str> = manifest.layers.iter().map(|l| l.digest.as_str()).collect();
        assert_eq!(digests, ["sha256:1111", "sha256:2222", "sha256:3333"]);
    }

    #[test]
    fn test_malformed_json_names_file() {
        let err = parse_manifest(b"{not json", "blobs/sha256/aaaa").unwrap_err();
        assert!(err.to_string().contains("blobs/sha256/aaaa"));

        let err = parse_index(b"\"index\"").unwrap_err();
        assert!(err.to_string().contains("index.json"));
    }

    #[test]
    fn test_blob_path() {
        assert_eq!(blob_path("sha256:abc123"), "blobs/sha256/abc123");
        assert_eq!(blob_path("abc123"), "blobs/sha256/abc123");
    }
}
