// Hash-chained export of registry contract events, plus the checks the
// CLI runs against it. An off-chain indexer writes one record per event
// (mints, renewals, transfers, pauses, price changes) in ledger order;
// each record commits to its predecessor so gaps and edits are detectable
// after the fact.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex encoding of 32 zero bytes; `prev_hash` of the first record.
pub const GENESIS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

// ─── Record schema ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Mint,
    Renew,
    Transfer,
    SetTarget,
    Pause,
    Unpause,
    SetPrice,
    SetCollector,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Mint => "Mint",
            ActionKind::Renew => "Renew",
            ActionKind::Transfer => "Transfer",
            ActionKind::SetTarget => "SetTarget",
            ActionKind::Pause => "Pause",
            ActionKind::Unpause => "Unpause",
            ActionKind::SetPrice => "SetPrice",
            ActionKind::SetCollector => "SetCollector",
        }
    }

    /// Administrative actions are the ones only the registry admin can
    /// perform.
    pub fn is_administrative(self) -> bool {
        matches!(
            self,
            ActionKind::Pause
                | ActionKind::Unpause
                | ActionKind::SetPrice
                | ActionKind::SetCollector
        )
    }
}

/// One exported contract event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the export, from zero, gapless.
    pub seq: u64,
    /// Ledger sequence the event was emitted in.
    pub ledger: u32,
    /// Ledger close time, unix seconds.
    pub timestamp: u64,
    /// Authorizing address (registration owner or admin).
    pub actor: String,
    pub action: ActionKind,
    /// Name components; empty for administrative actions.
    pub label: String,
    pub emoji: String,
    /// Free-form summary, e.g. "expires 1767225600" or "price 5000000000".
    pub detail: String,
    /// Hex SHA-256 of the previous record, [`GENESIS_HASH`] for the first.
    pub prev_hash: String,
    /// Hex SHA-256 over every field above.
    pub record_hash: String,
}

impl EventRecord {
    /// Canonical hash over all fields except `record_hash` itself. Fields
    /// are length-prefixed so adjacent strings cannot be confused.
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.seq.to_le_bytes());
        hasher.update(u32::to_le_bytes(self.ledger));
        hasher.update(self.timestamp.to_le_bytes());
        for field in [
            self.actor.as_str(),
            self.action.as_str(),
            self.label.as_str(),
            self.emoji.as_str(),
            self.detail.as_str(),
            self.prev_hash.as_str(),
        ] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    pub fn is_self_consistent(&self) -> bool {
        self.record_hash == self.compute_hash()
    }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// A full export as written by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReport {
    /// Contract the records were exported from.
    pub contract_id: String,
    /// Network passphrase identifier, e.g. "Test SDF Network ; September 2015".
    pub network: String,
    /// Unix seconds the export was taken.
    pub exported_at: u64,
    /// Merkle root over `record_hash` values, hex. None for empty exports.
    pub merkle_root: Option<String>,
    pub records: Vec<EventRecord>,
}

impl EventReport {
    /// Walks the chain from genesis to tip: every record must self-hash and
    /// commit to its predecessor, and sequence numbers must be gapless.
    pub fn verify_chain(&self) -> Result<(), String> {
        for (i, record) in self.records.iter().enumerate() {
            if record.seq != i as u64 {
                return Err(format!(
                    "record {} carries seq {}, expected {}",
                    i, record.seq, i
                ));
            }
            if !record.is_self_consistent() {
                return Err(format!("record {} fails its own hash", record.seq));
            }
            let expected_prev = if i == 0 {
                GENESIS_HASH
            } else {
                self.records[i - 1].record_hash.as_str()
            };
            if record.prev_hash != expected_prev {
                return Err(format!(
                    "record {} does not commit to its predecessor",
                    record.seq
                ));
            }
        }
        Ok(())
    }

    /// Re-derives the Merkle root from the record hashes.
    pub fn derive_merkle_root(&self) -> Option<String> {
        let leaves: Vec<[u8; 32]> = self
            .records
            .iter()
            .filter_map(|r| {
                let bytes = hex::decode(&r.record_hash).ok()?;
                bytes.try_into().ok()
            })
            .collect();
        if leaves.len() != self.records.len() {
            // A malformed hash field means no root can be trusted.
            return None;
        }
        merkle_root(&leaves).map(hex::encode)
    }

    pub fn filter<'a>(&'a self, filter: &RecordFilter) -> Vec<&'a EventRecord> {
        self.records
            .iter()
            .filter(|r| {
                filter.actor.as_ref().map_or(true, |a| &r.actor == a)
                    && filter.action.map_or(true, |a| r.action == a)
                    && filter.label.as_ref().map_or(true, |l| &r.label == l)
                    && filter.from_ts.map_or(true, |t| r.timestamp >= t)
                    && filter.to_ts.map_or(true, |t| r.timestamp <= t)
            })
            .collect()
    }

    /// Flags actors whose mint or admin activity exceeds a per-window cap.
    pub fn scan_bursts(&self, window_secs: u64, max_per_window: u64) -> Vec<BurstAlert> {
        let mut windows: HashMap<(String, bool, u64), u64> = HashMap::new();
        let mut alerts = Vec::new();

        for record in &self.records {
            let admin = record.action.is_administrative();
            if !admin && record.action != ActionKind::Mint {
                continue;
            }
            let bucket = record.timestamp / window_secs.max(1);
            let count = windows
                .entry((record.actor.clone(), admin, bucket))
                .or_insert(0);
            *count += 1;
            if *count == max_per_window + 1 {
                alerts.push(BurstAlert {
                    actor: record.actor.clone(),
                    administrative: admin,
                    window_start: bucket * window_secs.max(1),
                    count_at_detection: *count,
                    first_excess_seq: record.seq,
                });
            }
        }
        alerts
    }
}

/// One actor exceeding the per-window activity cap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BurstAlert {
    pub actor: String,
    /// True when the burst is of admin actions rather than mints.
    pub administrative: bool,
    pub window_start: u64,
    pub count_at_detection: u64,
    pub first_excess_seq: u64,
}

#[derive(Debug, Default, Clone)]
pub struct RecordFilter {
    pub actor: Option<String>,
    pub action: Option<ActionKind>,
    pub label: Option<String>,
    pub from_ts: Option<u64>,
    pub to_ts: Option<u64>,
}

// ─── Merkle helper ───────────────────────────────────────────────────────────

/// Pairwise SHA-256 reduction; an odd node is paired with itself.
pub fn merkle_root(hashes: &[[u8; 32]]) -> Option<[u8; 32]> {
    if hashes.is_empty() {
        return None;
    }
    let mut current: Vec<[u8; 32]> = hashes.to_vec();
    while current.len() > 1 {
        let mut next = Vec::with_capacity(current.len().div_ceil(2));
        for pair in current.chunks(2) {
            let mut hasher = Sha256::new();
            hasher.update(pair[0]);
            hasher.update(pair.get(1).unwrap_or(&pair[0]));
            next.push(hasher.finalize().into());
        }
        current = next;
    }
    current.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Appends a record to `records`, chaining and hashing it correctly,
    /// the way the indexer does when it writes an export.
    fn append_record(
        records: &mut Vec<EventRecord>,
        ledger: u32,
        timestamp: u64,
        actor: &str,
        action: ActionKind,
        label: &str,
        emoji: &str,
        detail: &str,
    ) {
        let prev_hash = records
            .last()
            .map(|r| r.record_hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string());
        let mut record = EventRecord {
            seq: records.len() as u64,
            ledger,
            timestamp,
            actor: actor.to_string(),
            action,
            label: label.to_string(),
            emoji: emoji.to_string(),
            detail: detail.to_string(),
            prev_hash,
            record_hash: String::new(),
        };
        record.record_hash = record.compute_hash();
        records.push(record);
    }

    fn sample_report() -> EventReport {
        let mut records = Vec::new();
        append_record(&mut records, 100, 1000, "GADMIN", ActionKind::Pause, "", "", "");
        append_record(&mut records, 101, 1005, "GADMIN", ActionKind::Unpause, "", "", "");
        append_record(
            &mut records,
            102,
            1010,
            "GBEAR",
            ActionKind::Mint,
            "🐻",
            "🐻",
            "expires 32537010",
        );
        append_record(
            &mut records,
            103,
            1015,
            "GBEAR",
            ActionKind::SetTarget,
            "🐻",
            "🐻",
            "target GHONEY",
        );
        let merkle_root = {
            let leaves: Vec<[u8; 32]> = records
                .iter()
                .map(|r| hex::decode(&r.record_hash).unwrap().try_into().unwrap())
                .collect();
            merkle_root(&leaves).map(hex::encode)
        };
        EventReport {
            contract_id: "CREGISTRY".to_string(),
            network: "Test SDF Network ; September 2015".to_string(),
            exported_at: 2000,
            merkle_root,
            records,
        }
    }

    #[test]
    fn test_well_formed_chain_verifies() {
        let report = sample_report();
        assert_eq!(report.verify_chain(), Ok(()));
        assert_eq!(report.derive_merkle_root(), report.merkle_root);
    }

    #[test]
    fn test_tampered_detail_breaks_self_hash() {
        let mut report = sample_report();
        report.records[2].detail = "expires 99999999".to_string();
        let err = report.verify_chain().unwrap_err();
        assert!(err.contains("record 2"), "unexpected error: {}", err);
    }

    #[test]
    fn test_rehashed_tamper_breaks_chain_linkage() {
        let mut report = sample_report();
        // An attacker who recomputes the record hash still breaks the next
        // record's commitment.
        report.records[1].actor = "GMALLORY".to_string();
        report.records[1].record_hash = report.records[1].compute_hash();
        let err = report.verify_chain().unwrap_err();
        assert!(err.contains("record 2"), "unexpected error: {}", err);
    }

    #[test]
    fn test_dropped_record_detected() {
        let mut report = sample_report();
        report.records.remove(1);
        assert!(report.verify_chain().is_err());
    }

    #[test]
    fn test_genesis_must_point_at_zeros() {
        let mut report = sample_report();
        report.records[0].prev_hash = report.records[0].record_hash.clone();
        report.records[0].record_hash = report.records[0].compute_hash();
        let err = report.verify_chain().unwrap_err();
        assert!(err.contains("record 0"), "unexpected error: {}", err);
    }

    #[test]
    fn test_empty_report_verifies_with_no_root() {
        let report = EventReport {
            contract_id: "CREGISTRY".to_string(),
            network: "test".to_string(),
            exported_at: 0,
            merkle_root: None,
            records: Vec::new(),
        };
        assert_eq!(report.verify_chain(), Ok(()));
        assert_eq!(report.derive_merkle_root(), None);
    }

    #[test]
    fn test_filter_by_action_and_actor() {
        let report = sample_report();

        let mints = report.filter(&RecordFilter {
            action: Some(ActionKind::Mint),
            ..RecordFilter::default()
        });
        assert_eq!(mints.len(), 1);
        assert_eq!(mints[0].actor, "GBEAR");

        let admin_ops = report.filter(&RecordFilter {
            actor: Some("GADMIN".to_string()),
            ..RecordFilter::default()
        });
        assert_eq!(admin_ops.len(), 2);

        let windowed = report.filter(&RecordFilter {
            from_ts: Some(1005),
            to_ts: Some(1010),
            ..RecordFilter::default()
        });
        assert_eq!(windowed.len(), 2);
    }

    #[test]
    fn test_burst_scan_flags_rapid_mints() {
        let mut records = Vec::new();
        for i in 0..8u64 {
            append_record(
                &mut records,
                100 + i as u32,
                1000 + i,
                "GBEAR",
                ActionKind::Mint,
                "spam",
                "🐻",
                "",
            );
        }
        let report = EventReport {
            contract_id: "CREGISTRY".to_string(),
            network: "test".to_string(),
            exported_at: 2000,
            merkle_root: None,
            records,
        };

        let alerts = report.scan_bursts(60, 5);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].actor, "GBEAR");
        assert!(!alerts[0].administrative);
        assert_eq!(alerts[0].count_at_detection, 6);

        // A higher cap stays quiet.
        assert!(report.scan_bursts(60, 10).is_empty());
    }

    #[test]
    fn test_merkle_root_odd_leaf_count() {
        let leaves = [[1u8; 32], [2u8; 32], [3u8; 32]];
        let root = merkle_root(&leaves);
        assert!(root.is_some());
        // Root over a duplicated odd tail differs from the two-leaf root.
        assert_ne!(root, merkle_root(&leaves[..2]));
    }

    proptest! {
        /// Chains built through append_record always verify, whatever the
        /// field contents.
        #[test]
        fn prop_appended_chains_verify(
            entries in proptest::collection::vec(("[a-zA-Z0-9]{1,12}", 0u64..100_000), 1..20)
        ) {
            let mut records = Vec::new();
            for (i, (actor, ts)) in entries.iter().enumerate() {
                let action = if i % 2 == 0 { ActionKind::Mint } else { ActionKind::Renew };
                append_record(&mut records, i as u32, *ts, actor, action, "label", "🐻", "d");
            }
            let report = EventReport {
                contract_id: "CREGISTRY".to_string(),
                network: "test".to_string(),
                exported_at: 0,
                merkle_root: None,
                records,
            };
            prop_assert_eq!(report.verify_chain(), Ok(()));
            prop_assert!(report.derive_merkle_root().is_some());
        }

        /// Flipping any single record's timestamp is always detected.
        #[test]
        fn prop_any_single_edit_detected(victim in 0usize..4) {
            let mut report = sample_report();
            report.records[victim].timestamp += 1;
            prop_assert!(report.verify_chain().is_err());
        }
    }
}
