use acrguide::guidelines::FindingValues;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Splits a `key=value` command-line argument. The value may be empty.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field id in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Repeated keys accumulate into a list, which is how checkbox fields are entered.
pub(crate) fn finding_from_assignments(assignments: &[(String, String)]) -> FindingValues {
    let mut finding = FindingValues::new();
    for (key, value) in assignments {
        finding.push(key.clone(), value.clone());
    }
    finding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(
            parse_assignment(" size = 7.5 "),
            Ok(("size".to_string(), "7.5".to_string()))
        );
        assert_eq!(
            parse_assignment("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_assignment("size="), Ok(("size".to_string(), String::new())));
        assert!(parse_assignment("=4").is_err());
        assert!(parse_assignment("size").is_err());
    }

    #[test]
    fn repeated_keys_become_lists() {
        let assignments = vec![
            ("regions".to_string(), "C".to_string()),
            ("lvo".to_string(), "yes".to_string()),
            ("regions".to_string(), "IC".to_string()),
        ];
        let finding = finding_from_assignments(&assignments);
        assert_eq!(finding.list("regions"), vec!["C", "IC"]);
        assert_eq!(finding.text("lvo"), "yes");
    }
}
