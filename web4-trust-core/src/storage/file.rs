//! File-based tensor store (JSON), one subdirectory per §6 key prefix.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::tensor::{T3Record, V3Record};
use crate::witnessing::{BirthCertificate, WitnessRelationship};

use super::TensorStore;

/// File-based tensor store. Records are JSON files under
/// `{base_dir}/{tensor_t3,tensor_v3,witness,birth_cert}/{hash}.json`.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        for sub in ["tensor_t3", "tensor_v3", "witness", "birth_cert"] {
            fs::create_dir_all(base_dir.join(sub))?;
        }
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn keyed_file(&self, prefix: &str, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = format!("{:x}", hasher.finalize());
        self.base_dir.join(prefix).join(format!("{}.json", &hash[..16]))
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl TensorStore for FileStore {
    fn get_t3(&self, lct_id: &str) -> Result<Option<T3Record>> {
        self.read_json(&self.keyed_file("tensor_t3", lct_id))
    }

    fn put_t3(&self, record: T3Record) -> Result<()> {
        self.write_json(&self.keyed_file("tensor_t3", &record.id), &record)
    }

    fn get_v3(&self, operation_id: &str) -> Result<Option<V3Record>> {
        self.read_json(&self.keyed_file("tensor_v3", operation_id))
    }

    fn put_v3(&self, record: V3Record) -> Result<()> {
        self.write_json(&self.keyed_file("tensor_v3", &record.id), &record)
    }

    fn add_witness(&self, witness: WitnessRelationship) -> Result<()> {
        let key = format!("{}/{}/{}", witness.witness_lct, witness.subject_lct, witness.timestamp);
        self.write_json(&self.keyed_file("witness", &key), &witness)
    }

    fn witnesses_of(&self, subject_lct: &str) -> Result<Vec<WitnessRelationship>> {
        let dir = self.base_dir.join("witness");
        let mut out = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(w) = self.read_json::<WitnessRelationship>(&path)? {
                    if w.subject_lct == subject_lct {
                        out.push(w);
                    }
                }
            }
        }
        Ok(out)
    }

    fn put_birth_certificate(&self, cert: BirthCertificate) -> Result<()> {
        self.write_json(&self.keyed_file("birth_cert", &cert.cert_id), &cert)
    }

    fn get_birth_certificate(&self, cert_id: &str) -> Result<Option<BirthCertificate>> {
        self.read_json(&self.keyed_file("birth_cert", cert_id))
    }
}
