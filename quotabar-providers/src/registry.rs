//! Dispatch from credential records to provider fetchers.

use quotabar_core::{AccountQuota, CredentialRecord, ProviderAccount, ProviderKind, QuotaReport};
use quotabar_fetch::ManagementApi;
use tracing::{info, instrument};

use crate::antigravity::AntigravityQuotaFetcher;
use crate::codex::CodexQuotaFetcher;

// ============================================================================
// Provider Registry
// ============================================================================

/// Holds one fetcher per supported provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    codex: CodexQuotaFetcher,
    antigravity: AntigravityQuotaFetcher,
}

impl ProviderRegistry {
    /// Creates a registry with default fetchers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the Codex fetcher.
    #[must_use]
    pub fn with_codex(mut self, fetcher: CodexQuotaFetcher) -> Self {
        self.codex = fetcher;
        self
    }

    /// Replaces the Antigravity fetcher.
    #[must_use]
    pub fn with_antigravity(mut self, fetcher: AntigravityQuotaFetcher) -> Self {
        self.antigravity = fetcher;
        self
    }

    /// Fetches quota for one credential.
    pub async fn fetch(&self, api: &dyn ManagementApi, record: &CredentialRecord) -> AccountQuota {
        match &record.account {
            ProviderAccount::Codex(account) => {
                AccountQuota::Codex(self.codex.fetch(api, record, account).await)
            }
            ProviderAccount::Antigravity(account) => {
                AccountQuota::Antigravity(self.antigravity.fetch(api, record, account).await)
            }
        }
    }

    /// Fetches every credential in order and collects the results.
    ///
    /// Accounts are fetched one after another; a failed account never
    /// stops the others.
    #[instrument(skip_all, fields(accounts = records.len()))]
    pub async fn collect(&self, api: &dyn ManagementApi, records: &[CredentialRecord]) -> QuotaReport {
        let mut report = QuotaReport::new();
        for record in records {
            report.push(self.fetch(api, record).await);
        }

        info!(
            codex = report.codex.len(),
            antigravity = report.antigravity.len(),
            "Collected quotas"
        );
        report
    }
}

/// Keeps records whose provider is in `kinds`, preserving order.
///
/// An empty `kinds` keeps everything.
pub fn filter_records(records: Vec<CredentialRecord>, kinds: &[ProviderKind]) -> Vec<CredentialRecord> {
    if kinds.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| kinds.contains(&record.provider()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotabar_core::{AntigravityAccount, CodexAccount};

    fn records() -> Vec<CredentialRecord> {
        vec![
            CredentialRecord::new("a", ProviderAccount::Antigravity(AntigravityAccount::default())),
            CredentialRecord::new("c", ProviderAccount::Codex(CodexAccount::default())),
            CredentialRecord::new("b", ProviderAccount::Antigravity(AntigravityAccount::default())),
        ]
    }

    #[test]
    fn test_filter_records_keeps_order() {
        let kept = filter_records(records(), &[ProviderKind::Antigravity]);
        let names: Vec<&str> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_filter_records_empty_keeps_all() {
        assert_eq!(filter_records(records(), &[]).len(), 3);
    }
}
