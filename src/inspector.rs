use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;
use tar::Archive;
use tracing::{debug, info};

use crate::archive::{fetch_archived_file, read_archived_file, rewind};
use crate::config::{BuildpackConfig, BUILDPACK_TOML};
use crate::error::{InspectError, Result};
use crate::manifest::{self, blob_path, INDEX_JSON};

/// One buildpack found in a buildpackage, with the digest of the
/// buildpackage when it identifies this buildpack.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildpackMetadata {
    pub config: BuildpackConfig,
    /// Manifest digest of the whole buildpackage (`sha256:<hex>`). Set for
    /// meta-buildpacks and for the buildpack of a single-layer package.
    pub sha256: Option<String>,
}

/// Reads buildpack metadata out of OCI-layout buildpackage archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildpackInspector;

impl BuildpackInspector {
    pub fn new() -> Self {
        BuildpackInspector
    }

    /// Open the archive at `path` and collect metadata for every layer,
    /// in manifest order.
    pub fn dependencies(&self, path: impl AsRef<Path>) -> Result<Vec<BuildpackMetadata>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InspectError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.dependencies_from_reader(file)
    }

    /// Same as [`dependencies`](Self::dependencies) over an already open,
    /// seekable tar stream. The stream is rewound before every lookup.
    pub fn dependencies_from_reader<R: Read + Seek>(
        &self,
        mut source: R,
    ) -> Result<Vec<BuildpackMetadata>> {
        let index = manifest::parse_index(&read_archived_file(&mut source, INDEX_JSON)?)?;
        let buildpackage_digest = index.first_manifest()?.to_string();

        let manifest_path = blob_path(&buildpackage_digest);
        let manifest = manifest::parse_manifest(
            &read_archived_file(&mut source, &manifest_path)?,
            &manifest_path,
        )?;

        let mut collection = Vec::with_capacity(manifest.layers.len());
        for layer in &manifest.layers {
            let config = read_layer_config(&mut source, &layer.digest)?;
            debug!(
                digest = %layer.digest,
                id = %config.buildpack.id,
                version = %config.buildpack.version,
                meta = config.is_meta(),
                "decoded buildpack.toml",
            );

            let sha256 = config.is_meta().then(|| buildpackage_digest.clone());
            collection.push(BuildpackMetadata { config, sha256 });
        }

        // A package holding exactly one buildpack is identified by its own digest.
        if let [only] = collection.as_mut_slice() {
            only.sha256 = Some(buildpackage_digest.clone());
        }

        info!(
            digest = %buildpackage_digest,
            buildpacks = collection.len(),
            "inspected buildpackage",
        );

        Ok(collection)
    }
}

/// Locate a layer blob, gunzip it and decode the buildpack.toml inside.
/// The decompressor lives only for the duration of this call.
fn read_layer_config<R: Read + Seek>(source: &mut R, digest: &str) -> Result<BuildpackConfig> {
    rewind(source)?;

    let mut archive = Archive::new(source);
    let blob = fetch_archived_file(&mut archive, &blob_path(digest))?;

    let mut decoder = GzDecoder::new(blob);
    if decoder.header().is_none() {
        return Err(InspectError::Gzip {
            digest: digest.to_string(),
            source: gzip_error(&mut decoder),
        });
    }

    let mut layer = Archive::new(decoder);
    let mut entry = fetch_archived_file(&mut layer, BUILDPACK_TOML)?;
    let mut contents = String::new();
    entry.read_to_string(&mut contents)?;

    BuildpackConfig::from_toml(&contents).map_err(|source| InspectError::Toml {
        digest: digest.to_string(),
        source,
    })
}

/// GzDecoder holds on to a bad header and reports it on the first read.
fn gzip_error<R: Read>(decoder: &mut GzDecoder<R>) -> io::Error {
    match decoder.read(&mut [0u8; 1]) {
        Err(err) => err,
        Ok(_) => io::Error::new(io::ErrorKind::InvalidData, "invalid gzip header"),
    }
}
