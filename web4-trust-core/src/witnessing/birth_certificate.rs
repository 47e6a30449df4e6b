//! Birth certificates (§4.4): a society-issued record requiring a minimum
//! witness count, keyed `birth_cert/<cert_id>` per §6.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrustError};
use crate::params::TrustParams;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BirthCertificate {
    pub cert_id: String,
    pub subject_lct: String,
    pub witnesses: Vec<String>,
    pub issued_at: DateTime<Utc>,
}

/// `CreateBirthCertificate`: fails unless at least
/// `TrustParams::min_birth_certificate_witnesses` distinct witnesses are
/// supplied.
pub fn create_birth_certificate(
    cert_id: impl Into<String>,
    subject_lct: impl Into<String>,
    witnesses: Vec<String>,
    params: &TrustParams,
    now: DateTime<Utc>,
) -> Result<BirthCertificate> {
    let mut distinct = witnesses.clone();
    distinct.sort();
    distinct.dedup();

    if distinct.len() < params.min_birth_certificate_witnesses {
        return Err(TrustError::InsufficientWitnesses {
            required: params.min_birth_certificate_witnesses,
            got: distinct.len(),
        });
    }

    Ok(BirthCertificate {
        cert_id: cert_id.into(),
        subject_lct: subject_lct.into(),
        witnesses: distinct,
        issued_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn two_witnesses_rejected_three_accepted() {
        let params = TrustParams::default();
        let two = vec!["lct:w1".to_string(), "lct:w2".to_string()];
        assert!(matches!(
            create_birth_certificate("cert:1", "lct:baby", two, &params, now()),
            Err(TrustError::InsufficientWitnesses { required: 3, got: 2 })
        ));

        let three = vec![
            "lct:w1".to_string(),
            "lct:w2".to_string(),
            "lct:w3".to_string(),
        ];
        let cert = create_birth_certificate("cert:1", "lct:baby", three, &params, now()).unwrap();
        assert_eq!(cert.witnesses.len(), 3);
    }

    #[test]
    fn duplicate_witnesses_do_not_count_twice() {
        let params = TrustParams::default();
        let dup = vec![
            "lct:w1".to_string(),
            "lct:w1".to_string(),
            "lct:w2".to_string(),
        ];
        assert!(matches!(
            create_birth_certificate("cert:1", "lct:baby", dup, &params, now()),
            Err(TrustError::InsufficientWitnesses { got: 2, .. })
        ));
    }
}
