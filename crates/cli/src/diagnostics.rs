//! Readiness checks for a Listin deployment.
//!
//! Every check group runs regardless of how the others went. Failures are
//! collected into the report and only decide the final verdict.

use listin_core::config::{DEFAULT_PORT, DEFAULT_TEMPLATE_ID};
use listin_core::AppConfig;
use listin_knowledge::{check_structure, load, parse_document, KnowledgeSection};
use listin_prompt::{bootstrap, template_path, StoreNameSource};
use serde::Serialize;

const RULE_WIDTH: usize = 60;

/// One line of a check group.
#[derive(Debug, Clone, Serialize)]
pub struct CheckItem {
    pub label: String,
    pub passed: bool,
    /// Optional items are reported but never fail their group
    pub required: bool,
    pub message: String,
}

impl CheckItem {
    fn required(label: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            passed,
            required: true,
            message: message.into(),
        }
    }

    fn optional(label: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(label, passed, message)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckGroup {
    pub name: &'static str,
    pub title: &'static str,
    pub passed: bool,
    pub items: Vec<CheckItem>,
}

impl CheckGroup {
    fn new(name: &'static str, title: &'static str, items: Vec<CheckItem>) -> Self {
        let passed = items.iter().filter(|i| i.required).all(|i| i.passed);
        Self {
            name,
            title,
            passed,
            items,
        }
    }

    pub fn item(&self, label: &str) -> Option<&CheckItem> {
        self.items.iter().find(|i| i.label == label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub success: bool,
    pub passed: usize,
    pub total: usize,
    pub groups: Vec<CheckGroup>,
}

impl DiagnosticReport {
    pub fn group(&self, name: &str) -> Option<&CheckGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Run every check against `config`, reading variables through `env`.
pub fn run_checks<F>(config: &AppConfig, env: F) -> DiagnosticReport
where
    F: Fn(&str) -> Option<String>,
{
    let groups = vec![
        check_files(config),
        check_knowledge_structure(config),
        check_environment(config, &env),
        check_store_data_loading(config),
        check_agent_bootstrap(config),
    ];

    let total = groups.len();
    let passed = groups.iter().filter(|g| g.passed).count();

    for group in groups.iter().filter(|g| !g.passed) {
        tracing::debug!("Check group '{}' failed", group.name);
    }

    DiagnosticReport {
        success: passed == total,
        passed,
        total,
        groups,
    }
}

fn check_files(config: &AppConfig) -> CheckGroup {
    let data_path = config.knowledge_path();
    let data_exists = data_path.is_file();

    let template_file = template_path(&config.workspace, &config.template_id);
    let template_item = if template_file.is_file() {
        CheckItem::required(
            "instruction template",
            true,
            format!("{}", template_file.display()),
        )
    } else if config.template_id == DEFAULT_TEMPLATE_ID {
        CheckItem::required("instruction template", true, "builtin")
    } else {
        CheckItem::required(
            "instruction template",
            false,
            format!("Not found: {}", template_file.display()),
        )
    };

    CheckGroup::new(
        "files",
        "📁 CHECKING FILES",
        vec![
            CheckItem::required(
                "knowledge document",
                data_exists,
                format!("{}", data_path.display()),
            ),
            template_item,
        ],
    )
}

fn check_knowledge_structure(config: &AppConfig) -> CheckGroup {
    const NAME: &str = "knowledge_structure";
    const TITLE: &str = "📋 CHECKING JSON STRUCTURE";

    let path = config.knowledge_path();
    if !path.is_file() {
        return CheckGroup::new(
            NAME,
            TITLE,
            vec![CheckItem::required("JSON File", false, "File not found")],
        );
    }

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            return CheckGroup::new(
                NAME,
                TITLE,
                vec![CheckItem::required("JSON Read", false, format!("Error: {}", e))],
            );
        }
    };

    let document = match parse_document(&contents) {
        Ok(document) => document,
        Err(e) => {
            return CheckGroup::new(
                NAME,
                TITLE,
                vec![CheckItem::required(
                    "JSON Valid",
                    false,
                    format!("Parse error: {}", e),
                )],
            );
        }
    };

    let mut items = vec![CheckItem::required("JSON Valid", true, "Successfully parsed")];
    items.extend(
        check_structure(&document)
            .fields
            .into_iter()
            .map(|field| CheckItem::required(field_label(field.section), field.present, "")),
    );

    CheckGroup::new(NAME, TITLE, items)
}

fn field_label(section: KnowledgeSection) -> String {
    format!("Field: {}", section.key())
}

fn check_environment<F>(config: &AppConfig, env: &F) -> CheckGroup
where
    F: Fn(&str) -> Option<String>,
{
    let api_key_env = &config.credentials.api_key_env;
    let api_key_set = env(api_key_env.as_str()).is_some();

    let credentials_env = &config.credentials.credentials_file_env;
    let credentials_set = env(credentials_env.as_str()).is_some();

    let port_source = if env("PORT").is_some() {
        "PORT"
    } else if config.port == DEFAULT_PORT {
        "default"
    } else {
        "config file"
    };
    let port_message = format!("{} ({})", config.port, port_source);

    CheckGroup::new(
        "environment",
        "🔐 CHECKING ENVIRONMENT VARIABLES",
        vec![
            CheckItem::required(
                api_key_env.clone(),
                api_key_set,
                if api_key_set {
                    "Set"
                } else {
                    "Not set (required for API calls)"
                },
            ),
            CheckItem::optional(
                credentials_env.clone(),
                credentials_set,
                if credentials_set {
                    "Set"
                } else {
                    "Not set (optional)"
                },
            ),
            CheckItem::optional("PORT", true, port_message),
        ],
    )
}

fn check_store_data_loading(config: &AppConfig) -> CheckGroup {
    const NAME: &str = "store_data";
    const TITLE: &str = "📥 CHECKING STORE DATA LOADING";

    let outcome = load(&config.knowledge_path());
    if let listin_knowledge::LoadStatus::Degraded(reason) = &outcome.status {
        return CheckGroup::new(
            NAME,
            TITLE,
            vec![CheckItem::required(
                "store_data loaded",
                false,
                reason.to_string(),
            )],
        );
    }

    let document = outcome.document;
    let store_name_item = match document.store_name() {
        Some(name) if !name.trim().is_empty() => {
            CheckItem::required("store_name extracted", true, format!("Value: '{}'", name))
        }
        _ => CheckItem::optional(
            "store_name extracted",
            false,
            format!("Missing, fallback '{}' will be used", config.fallback_store_name),
        ),
    };

    CheckGroup::new(
        NAME,
        TITLE,
        vec![
            CheckItem::required("store_data loaded", true, ""),
            store_name_item,
            CheckItem::optional(
                "store_data not empty",
                !document.is_empty(),
                format!("Keys: {}", document.len()),
            ),
        ],
    )
}

fn check_agent_bootstrap(config: &AppConfig) -> CheckGroup {
    let item = match bootstrap(config) {
        Ok(boot) => {
            let source = match boot.instruction.store_name_source {
                StoreNameSource::Document => "document",
                StoreNameSource::Fallback => "fallback",
            };
            CheckItem::required(
                "instruction compiled",
                true,
                format!(
                    "{} v{}, {} bytes, store name from {}",
                    boot.instruction.template_id,
                    boot.instruction.template_version,
                    boot.instruction.text.len(),
                    source
                ),
            )
        }
        Err(e) => CheckItem::required("instruction compiled", false, e.to_string()),
    };

    CheckGroup::new("agent", "🔗 CHECKING AGENT BOOTSTRAP", vec![item])
}

fn status_line(label: &str, passed: bool, message: &str) -> String {
    let symbol = if passed { "✅" } else { "❌" };
    format!("{} {:<40} {}", symbol, label, message)
        .trim_end()
        .to_string()
}

/// Render the human-readable report.
pub fn render_human(report: &DiagnosticReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = Vec::new();

    lines.push(format!(
        "{:=^width$}",
        " 🧪 LISTIN AGENT VALIDATION 🧪 ",
        width = RULE_WIDTH
    ));

    for group in &report.groups {
        lines.push(String::new());
        lines.push(rule.clone());
        lines.push(group.title.to_string());
        lines.push(rule.clone());
        for item in &group.items {
            lines.push(status_line(&item.label, item.passed, &item.message));
        }
    }

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push("📊 SUMMARY".to_string());
    lines.push(rule);
    for group in &report.groups {
        lines.push(status_line(group.name, group.passed, ""));
    }

    let divider = "-".repeat(RULE_WIDTH);
    lines.push(String::new());
    lines.push(divider.clone());
    lines.push(format!(
        "Total: {}/{} checks passed",
        report.passed, report.total
    ));
    lines.push(divider);
    lines.push(String::new());

    if report.success {
        lines.push("✅ ALL CHECKS PASSED! The agent is ready to be served.".to_string());
    } else {
        lines.push(format!(
            "⚠️  {} check(s) failed. Please fix issues above.",
            report.total - report.passed
        ));
    }

    lines.join("\n")
}
