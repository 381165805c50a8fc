//! Plan file schema definitions.
//!
//! These structs map to the YAML plan format. A plan is pure data: the
//! ordered provisioning steps, the read-only queries that feed the report,
//! the checks evaluated against those facts, and the teardown commands.

use serde::{Deserialize, Serialize};

/// Root structure of a plan file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanConfig {
    /// Display title for the run header and report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Ordered provisioning steps.
    pub steps: Vec<StepConfig>,

    /// Read-only queries run after every step succeeded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<FactConfig>,

    /// Expected-vs-actual checks evaluated against gathered facts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckConfig>,

    /// Teardown commands, only run by `rigup cleanup`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cleanup: Vec<String>,
}

impl PlanConfig {
    /// Title to display, falling back to a generic one.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("Provisioning run")
    }
}

/// One named provisioning step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepConfig {
    /// Label shown in progress output and failure messages.
    pub name: String,

    /// Commands run in order; the first failure fails the step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,

    /// Queries run after the commands whose output becomes a named fact.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<CaptureConfig>,
}

/// A value captured from a command's trimmed stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureConfig {
    /// Fact key later commands can reference as `${name}`.
    pub name: String,

    /// Query command.
    pub command: String,
}

/// A fact gathered for the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactConfig {
    /// Fact key, referenced by checks.
    pub key: String,

    /// Human readable label shown in the report.
    pub label: String,

    /// Read-only query command.
    pub command: String,
}

/// A known discrepancy to look for once facts are gathered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Short title of the problem.
    pub title: String,

    /// Longer explanation shown when the discrepancy is detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Key of the gathered fact holding the actual value.
    pub fact: String,

    /// Expected value; may reference parameters and facts.
    pub expected: String,

    /// Commands a human can run to fix the problem.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remediation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_plan() {
        let yaml = r#"
steps:
  - name: Create group
    commands: ["az group create -n ${resource_group}"]
"#;
        let plan: PlanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].name, "Create group");
        assert!(plan.facts.is_empty());
        assert_eq!(plan.title(), "Provisioning run");
    }

    #[test]
    fn parses_full_plan() {
        let yaml = r#"
name: Lab
steps:
  - name: Firewall
    commands: ["az network firewall create -n fw"]
    captures:
      - name: fw_ip
        command: "az network firewall show -n fw --query ip -o tsv"
facts:
  - key: next_hop
    label: Spoke route next hop
    command: "az network route-table route show --query nextHopIpAddress -o tsv"
checks:
  - title: Wrong next hop
    fact: next_hop
    expected: "${fw_ip}"
    remediation: ["az network route-table route update --next-hop-ip-address ${fw_ip}"]
cleanup:
  - "az group delete -n ${resource_group} --yes"
"#;
        let plan: PlanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.title(), "Lab");
        assert_eq!(plan.steps[0].captures[0].name, "fw_ip");
        assert_eq!(plan.facts[0].label, "Spoke route next hop");
        assert_eq!(plan.checks[0].expected, "${fw_ip}");
        assert!(plan.checks[0].description.is_none());
        assert_eq!(plan.cleanup.len(), 1);
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = r#"
steps:
  - name: One
    command: "typo for commands"
"#;
        assert!(serde_yaml::from_str::<PlanConfig>(yaml).is_err());
    }
}
