//! Storage trait for the trust tensor engine. Keys follow §6's layout:
//! `tensor_t3/<lct_id>`, `tensor_v3/<operation_id>`,
//! `witness/<witness_lct>/<subject_lct>`, `birth_cert/<cert_id>`.

use crate::error::Result;
use crate::tensor::{T3Record, V3Record};
use crate::witnessing::{BirthCertificate, WitnessRelationship};

pub trait TensorStore {
    fn get_t3(&self, lct_id: &str) -> Result<Option<T3Record>>;
    fn put_t3(&self, record: T3Record) -> Result<()>;

    fn get_v3(&self, operation_id: &str) -> Result<Option<V3Record>>;
    fn put_v3(&self, record: V3Record) -> Result<()>;

    fn add_witness(&self, witness: WitnessRelationship) -> Result<()>;
    /// Witnesses of `subject_lct`, i.e. all records with that subject.
    fn witnesses_of(&self, subject_lct: &str) -> Result<Vec<WitnessRelationship>>;

    fn put_birth_certificate(&self, cert: BirthCertificate) -> Result<()>;
    fn get_birth_certificate(&self, cert_id: &str) -> Result<Option<BirthCertificate>>;
}
