//! CLI output formatting tests.
//!
//! These tests verify the SwiftBar lines and JSON shape for fixed inputs.

#[cfg(test)]
mod swiftbar_formatter_tests {
    use super::super::swiftbar::{band_color, format_percent, render_error, SwiftBarFormatter};
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
    use quotabar_core::{
        AntigravityQuota, CodexQuota, CodexUsage, CodexWindow, ModelGroupQuota, QuotaReport,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 27, 14, 0, 0).unwrap()
    }

    fn formatter() -> SwiftBarFormatter<Utc> {
        SwiftBarFormatter::new(now())
    }

    fn group(label: &str, fraction: Option<f64>, reset: Option<&str>) -> ModelGroupQuota {
        let mut group = ModelGroupQuota::new(label.to_lowercase(), label);
        group.observe("m", fraction, reset.map(str::to_string));
        group
    }

    // ------------------------------------------------------------------------
    // Reset times
    // ------------------------------------------------------------------------

    #[test]
    fn test_reset_after_non_positive_is_now() {
        let f = formatter();
        assert_eq!(f.format_reset_after(None), "now");
        assert_eq!(f.format_reset_after(Some(0)), "now");
        assert_eq!(f.format_reset_after(Some(-30)), "now");
    }

    #[test]
    fn test_reset_after_one_hour() {
        assert_eq!(formatter().format_reset_after(Some(3600)), "2月27日 15:00");
    }

    #[test]
    fn test_reset_after_crosses_midnight_in_local_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let f = SwiftBarFormatter::new(now().with_timezone(&tokyo));
        // 23:00 local + 2h
        assert_eq!(f.format_reset_after(Some(7200)), "2月28日 01:00");
    }

    #[test]
    fn test_reset_time_past_is_resetting() {
        let past = (now() - Duration::minutes(10)).to_rfc3339();
        assert_eq!(formatter().format_reset_time(Some(&past)), "resetting");
    }

    #[test]
    fn test_reset_time_future_is_local() {
        let f = formatter();
        assert_eq!(f.format_reset_time(Some("2026-03-01T09:05:00Z")), "3月1日 09:05");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let f = SwiftBarFormatter::new(now().with_timezone(&tokyo));
        assert_eq!(f.format_reset_time(Some("2026-03-01T09:05:00Z")), "3月1日 18:05");
    }

    #[test]
    fn test_reset_time_malformed_is_empty() {
        let f = formatter();
        assert_eq!(f.format_reset_time(None), "");
        assert_eq!(f.format_reset_time(Some("")), "");
        assert_eq!(f.format_reset_time(Some("tomorrow")), "");
    }

    // ------------------------------------------------------------------------
    // Title
    // ------------------------------------------------------------------------

    #[test]
    fn test_title_empty_report() {
        assert_eq!(formatter().title(&QuotaReport::new()), "📊 Quota | size=13");
    }

    #[test]
    fn test_title_uses_first_accounts_only() {
        let mut report = QuotaReport::new();
        report.codex.push(CodexQuota::ok(
            "a",
            "plus",
            CodexUsage {
                primary: Some(CodexWindow::new(30.0, 60)),
                ..CodexUsage::default()
            },
        ));
        report.codex.push(CodexQuota::ok(
            "b",
            "plus",
            CodexUsage {
                primary: Some(CodexWindow::new(99.0, 60)),
                ..CodexUsage::default()
            },
        ));
        report.antigravity.push(AntigravityQuota::ok(
            "c",
            vec![
                group("Gemini 3 Pro", Some(0.8), None),
                group("Claude/GPT", Some(0.125), None),
            ],
        ));
        report.antigravity.push(AntigravityQuota::failed("d", "HTTP 500"));

        assert_eq!(formatter().title(&report), "🤖C:70% 🌀A:12% | size=13");
    }

    #[test]
    fn test_title_markers() {
        let mut report = QuotaReport::new();
        report.codex.push(CodexQuota::ok(
            "a",
            "plus",
            CodexUsage {
                primary: Some(CodexWindow::new(100.0, 60)),
                secondary: None,
                limit_reached: true,
            },
        ));
        report.antigravity.push(AntigravityQuota::failed("b", "HTTP 403"));
        assert_eq!(formatter().title(&report), "🔴C:0% 🌀A:⚠️ | size=13");

        let mut report = QuotaReport::new();
        report.codex.push(CodexQuota::failed("a", "", "missing auth_index"));
        report
            .antigravity
            .push(AntigravityQuota::ok("b", vec![group("Gemini 3 Pro", None, None)]));
        assert_eq!(formatter().title(&report), "🤖C:? 🌀A:? | size=13");
    }

    // ------------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------------

    #[test]
    fn test_codex_section() {
        let quotas = vec![
            CodexQuota::ok(
                "u@x.com",
                "plus",
                CodexUsage {
                    primary: Some(CodexWindow::new(30.0, 3600)),
                    secondary: Some(CodexWindow {
                        used_percent: Some(12.5),
                        reset_after_seconds: None,
                    }),
                    limit_reached: false,
                },
            ),
            CodexQuota::ok("w@x.com", "", CodexUsage::default()),
            CodexQuota::failed("", "plus", "HTTP 401"),
        ];

        assert_eq!(
            formatter().codex_section(&quotas),
            vec![
                "🤖 Codex (3 accounts) | size=14 color=#ffffff",
                "--  🟢 u@x.com [PLUS] | font=Menlo size=12",
                "----  5h window: 70% 🔄2月27日 15:00 | font=Menlo size=11",
                "----  Weekly: 87.5% 🔄now | font=Menlo size=11",
                "--  🟢 w@x.com [?] | font=Menlo size=12",
                "--  ❌ unknown — HTTP 401 | font=Menlo size=12",
            ]
        );
    }

    #[test]
    fn test_codex_limit_reached_marker() {
        let quotas = vec![CodexQuota::ok(
            "u@x.com",
            "team",
            CodexUsage {
                limit_reached: true,
                ..CodexUsage::default()
            },
        )];
        let lines = formatter().codex_section(&quotas);
        assert_eq!(lines[1], "--  🔴 u@x.com [TEAM] | font=Menlo size=12");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_antigravity_section() {
        let quotas = vec![
            AntigravityQuota::ok(
                "v@y.com",
                vec![
                    group("Claude/GPT", Some(0.51), Some("2026-02-27T18:30:00Z")),
                    group("Gemini 2.5 Pro", Some(0.5), Some("2026-02-27T13:00:00Z")),
                    group("Gemini 3 Flash", Some(0.2), Some("garbage")),
                    group("Gemini 3 Pro", None, None),
                ],
            ),
            AntigravityQuota::ok("", Vec::new()),
            AntigravityQuota::failed("z@y.com", "no models in response"),
        ];

        assert_eq!(
            formatter().antigravity_section(&quotas),
            vec![
                "🌀 Antigravity (3 accounts) | size=14 color=#ffffff",
                "--  🟢 v@y.com | font=Menlo size=12",
                "----  Claude/GPT: 51% 🔄2月27日 18:30 | font=Menlo size=11 color=#4caf50",
                "----  Gemini 2.5 Pro: 50% 🔄resetting | font=Menlo size=11 color=#ff9800",
                "----  Gemini 3 Flash: 20% | font=Menlo size=11 color=#f44336",
                "----  Gemini 3 Pro: N/A | font=Menlo size=11 color=#888888",
                "--  🟢 unknown | font=Menlo size=12",
                "----  No model data | font=Menlo size=11 color=#888888",
                "--  ❌ z@y.com — no models in response | font=Menlo size=12",
            ]
        );
    }

    #[test]
    fn test_band_cut_points() {
        assert_eq!(band_color(100), "#4caf50");
        assert_eq!(band_color(51), "#4caf50");
        assert_eq!(band_color(50), "#ff9800");
        assert_eq!(band_color(21), "#ff9800");
        assert_eq!(band_color(20), "#f44336");
        assert_eq!(band_color(0), "#f44336");
    }

    #[test]
    fn test_half_percent_rounds_to_even() {
        let quotas = vec![AntigravityQuota::ok(
            "v",
            vec![group("Gemini 2.5 Pro", Some(0.125), None)],
        )];
        let lines = formatter().antigravity_section(&quotas);
        assert_eq!(
            lines[2],
            "----  Gemini 2.5 Pro: 12% | font=Menlo size=11 color=#f44336"
        );
    }

    #[test]
    fn test_out_of_range_fraction_renders_unclamped() {
        let quotas = vec![AntigravityQuota::ok(
            "v",
            vec![
                group("Claude/GPT", Some(1.3), None),
                group("Gemini 3 Pro", Some(-0.05), None),
            ],
        )];
        let lines = formatter().antigravity_section(&quotas);
        assert_eq!(
            lines[2],
            "----  Claude/GPT: 130% | font=Menlo size=11 color=#4caf50"
        );
        assert_eq!(
            lines[3],
            "----  Gemini 3 Pro: -5% | font=Menlo size=11 color=#f44336"
        );
        assert!(quotas[0].groups()[0].validate().is_err());
    }

    #[test]
    fn test_codex_percent_has_one_decimal_at_most() {
        assert_eq!(format_percent(70.0), "70");
        assert_eq!(format_percent(87.5), "87.5");
        assert_eq!(format_percent(100.0 - 33.333_333_3), "66.7");
        assert_eq!(format_percent(0.04), "0");
        assert_eq!(format_percent(-0.04), "0");

        let mut report = QuotaReport::new();
        report.codex.push(CodexQuota::ok(
            "u@x.com",
            "plus",
            CodexUsage {
                primary: Some(CodexWindow::new(33.333_333_3, 3600)),
                ..CodexUsage::default()
            },
        ));
        let f = formatter();
        assert_eq!(f.title(&report), "🤖C:66.7% | size=13");
        assert_eq!(
            f.codex_section(&report.codex)[2],
            "----  5h window: 66.7% 🔄2月27日 15:00 | font=Menlo size=11"
        );
    }

    // ------------------------------------------------------------------------
    // Whole screens
    // ------------------------------------------------------------------------

    #[test]
    fn test_report_skips_empty_sections() {
        let mut report = QuotaReport::new();
        report.antigravity.push(AntigravityQuota::failed("v", "HTTP 500"));

        let lines = formatter().render_report(&report, "http://cpa");
        assert_eq!(
            lines,
            vec![
                "🌀A:⚠️ | size=13",
                "---",
                "🌀 Antigravity (1 accounts) | size=14 color=#ffffff",
                "--  ❌ v — HTTP 500 | font=Menlo size=12",
                "---",
                "🕐 Updated: 14:00:00 | size=11 color=#888888",
                "---",
                "🔄 Refresh | refresh=true",
                "⚙️ Management Center | href=http://cpa size=12",
            ]
        );
    }

    #[test]
    fn test_error_screen() {
        assert_eq!(
            render_error("CPA_BASE_URL not set"),
            vec![
                "⚠️ Quota | color=red",
                "---",
                "Error: CPA_BASE_URL not set | color=red",
                "---",
                "🔄 Retry | refresh=true",
            ]
        );
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use quotabar_core::{AntigravityQuota, CodexQuota, QuotaReport};
    use serde_json::{json, Value};

    #[test]
    fn test_failed_accounts_carry_error() {
        let mut report = QuotaReport::new();
        report
            .codex
            .push(CodexQuota::failed("u", "plus", "missing chatgpt_account_id"));
        report.antigravity.push(AntigravityQuota::failed("v", "HTTP 429"));

        let output = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            json!({
                "codex": [{
                    "email": "u",
                    "planType": "plus",
                    "limitReached": false,
                    "primary": null,
                    "secondary": null,
                    "error": "missing chatgpt_account_id"
                }],
                "antigravity": [{
                    "email": "v",
                    "groups": [],
                    "error": "HTTP 429"
                }]
            })
        );
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let output = JsonFormatter::new(true).format_error("boom").unwrap();
        assert_eq!(output, "{\n  \"error\": \"boom\"\n}");
    }
}
