use crate::domain::{ChallengeId, ChallengeKind, GroupId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points awarded for a qualifying report
pub const REPORT_POINTS: u32 = 10;

/// Maximum words allowed in a text proof
pub const MAX_PROOF_WORDS: usize = 100;

/// Optional evidence attached to a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Proof {
    Text { text: String },
    Image { url: String },
}

/// Errors that can occur when building a report
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReportError {
    #[error("Text proof is too long: {0} words (max {MAX_PROOF_WORDS})")]
    ProofTooLong(usize),
}

/// Points a report earns.
///
/// A binary "not done" report earns nothing; everything else earns the
/// flat award.
pub fn points_awarded(kind: ChallengeKind, is_done: bool) -> u32 {
    match kind {
        ChallengeKind::Binary if !is_done => 0,
        _ => REPORT_POINTS,
    }
}

/// A report the client is about to submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub challenge_id: ChallengeId,
    pub group_id: GroupId,
    pub user_id: UserId,

    /// 1/0 for binary challenges, the reported count for numeric ones
    pub value: u32,
    pub is_done: bool,
    pub points_earned: u32,

    #[serde(default)]
    pub proof: Option<Proof>,
}

impl ReportDraft {
    /// A done/not-done report for a binary challenge
    pub fn binary(challenge_id: ChallengeId, group_id: GroupId, user_id: UserId, done: bool) -> Self {
        Self {
            challenge_id,
            group_id,
            user_id,
            value: if done { 1 } else { 0 },
            is_done: done,
            points_earned: points_awarded(ChallengeKind::Binary, done),
            proof: None,
        }
    }

    /// A count report for a numeric challenge
    pub fn numeric(challenge_id: ChallengeId, group_id: GroupId, user_id: UserId, value: u32) -> Self {
        Self {
            challenge_id,
            group_id,
            user_id,
            value,
            is_done: true,
            points_earned: points_awarded(ChallengeKind::Numeric, true),
            proof: None,
        }
    }

    /// Attach a text proof, enforcing the word cap.
    pub fn with_proof_text(mut self, text: String) -> Result<Self, ReportError> {
        let words = text.split_whitespace().count();
        if words > MAX_PROOF_WORDS {
            return Err(ReportError::ProofTooLong(words));
        }
        self.proof = Some(Proof::Text { text });
        Ok(self)
    }

    /// Attach an already-uploaded proof image by URL.
    pub fn with_proof_image(mut self, url: String) -> Self {
        self.proof = Some(Proof::Image { url });
        self
    }
}

/// A stored report row, as fetched for a member's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub challenge_id: ChallengeId,
    pub group_id: GroupId,
    pub user_id: UserId,
    pub value: u32,
    pub is_done: bool,
    pub points_earned: u32,
    #[serde(default)]
    pub proof: Option<Proof>,
    pub created_at: DateTime<Utc>,
}
