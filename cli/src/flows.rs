//! User-facing interaction sequences.
//!
//! Each flow is one cooperative task: it may pause at prompts and at the
//! network call, reports every failure as a banner, and never leaves a
//! partial effect behind. Prompt cancellation abandons the operation
//! silently.

use std::collections::BTreeMap;

use serde_json::Value;

use mcpman_client::ApiClient;
use mcpman_registry::{ServerRegistry, SettingsStore};
use mcpman_types::{Method, ServerRecord};

use crate::presenter::ServerListPresenter;
use crate::report;
use crate::surface::{DisplaySurface, PromptSurface};

/// Orchestrates registry + client against the prompt/display surfaces.
pub struct Flows<'a, S, P, D> {
    registry: &'a ServerRegistry<S>,
    client: &'a ApiClient,
    prompt: &'a P,
    display: &'a D,
}

impl<'a, S, P, D> Flows<'a, S, P, D>
where
    S: SettingsStore,
    P: PromptSurface,
    D: DisplaySurface,
{
    pub fn new(
        registry: &'a ServerRegistry<S>,
        client: &'a ApiClient,
        prompt: &'a P,
        display: &'a D,
    ) -> Self {
        Self {
            registry,
            client,
            prompt,
            display,
        }
    }

    /// Render the configured servers.
    pub fn list(&self) {
        let presenter = ServerListPresenter::new(self.registry);
        match presenter.rows() {
            Ok(rows) if rows.is_empty() => {
                self.display.info("No MCP servers configured. Add a server first.");
            }
            Ok(rows) => {
                for row in rows {
                    self.display.info(&format!("{}  ({})", row.label, row.description));
                }
            }
            Err(e) => report::registry_failed(self.display, "list servers", &e),
        }
    }

    /// Prompt for a new server and add it to the registry.
    pub fn add(&self) {
        let Some(record) = self.prompt_record(None) else {
            return;
        };

        let issues = self.registry.validate(&record);
        if !issues.is_empty() {
            report::validation_failed(self.display, "add server", &issues);
            return;
        }

        let name = record.name.clone();
        match self.registry.add(record) {
            Ok(()) => self.display.info(&format!("Server \"{name}\" added.")),
            Err(e) => report::registry_failed(self.display, "add server", &e),
        }
    }

    /// Pick a server, prompt for replacement values, and update it.
    pub fn edit(&self) {
        let Some(old) = self.select_server("Select an MCP server to edit") else {
            return;
        };
        let Some(new) = self.prompt_record(Some(&old)) else {
            return;
        };

        let issues = self.registry.validate(&new);
        if !issues.is_empty() {
            report::validation_failed(self.display, "edit server", &issues);
            return;
        }

        let name = new.name.clone();
        match self.registry.update(&old, new) {
            Ok(()) => self.display.info(&format!("Server \"{name}\" updated.")),
            Err(e) => report::registry_failed(self.display, "edit server", &e),
        }
    }

    /// Pick a server, confirm, and delete it.
    pub fn delete(&self) {
        let Some(server) = self.select_server("Select an MCP server to delete") else {
            return;
        };

        let question = format!("Delete server \"{}\"?", server.name);
        if !self.prompt.confirm(&question) {
            return;
        }

        match self.registry.delete(&server) {
            Ok(()) => {
                self.display.info(&format!("Server \"{}\" deleted.", server.name));
            }
            Err(e) => report::registry_failed(self.display, "delete server", &e),
        }
    }

    /// Pick a server, prompt for endpoint/method/body, and issue the call.
    pub async fn call(&self) {
        let Some(server) = self.select_server("Select an MCP server to call") else {
            return;
        };

        let endpoint = match self.prompt.input(
            &format!("Enter API endpoint for {}", server.name),
            "/api/endpoint",
            false,
        ) {
            Some(text) if !text.trim().is_empty() => text,
            _ => return,
        };

        let labels: Vec<String> = Method::ALL.iter().map(ToString::to_string).collect();
        let Some(index) = self.prompt.pick("Select HTTP method", &labels) else {
            return;
        };
        let method = Method::ALL[index];

        let body = if method.allows_body() {
            match self.read_json_body() {
                Ok(body) => body,
                Err(()) => return,
            }
        } else {
            None
        };

        self.display
            .info(&format!("Calling {} {} on \"{}\"...", method, endpoint.trim(), server.name));

        match self
            .client
            .call(&server, endpoint.trim(), method, body.as_ref())
            .await
        {
            Ok(response) if response.is_success() => {
                let title = format!("{} {} - HTTP {}", method, endpoint.trim(), response.status);
                self.display.show_json(&title, &response.data.to_display_value());
            }
            Ok(response) => report::http_error(self.display, &server.name, &response),
            Err(e) => report::call_failed(self.display, &server.name, &e),
        }
    }

    /// Pick a server and probe whether it is reachable.
    pub async fn test(&self) {
        let Some(server) = self.select_server("Select an MCP server to test") else {
            return;
        };

        self.display.info(&format!("Testing connection to \"{}\"...", server.name));
        if self.client.test_connection(&server).await {
            self.display.info(&format!("Server \"{}\" is reachable.", server.name));
        } else {
            self.display.warn(&format!("Server \"{}\" is not reachable.", server.name));
        }
    }

    /// Pick one configured server, or report why there is nothing to pick.
    fn select_server(&self, prompt_text: &str) -> Option<ServerRecord> {
        let servers = match self.registry.list() {
            Ok(servers) => servers,
            Err(e) => {
                report::registry_failed(self.display, "load servers", &e);
                return None;
            }
        };

        if servers.is_empty() {
            self.display.info("No MCP servers configured. Add a server first.");
            return None;
        }

        let labels: Vec<String> = servers
            .iter()
            .map(|s| format!("{} ({})", s.name, s.url))
            .collect();
        let index = self.prompt.pick(prompt_text, &labels)?;
        servers.into_iter().nth(index)
    }

    /// Prompt for record fields. With `old` set (edit), empty answers keep
    /// the previous value; without it (add), an empty required answer
    /// cancels.
    fn prompt_record(&self, old: Option<&ServerRecord>) -> Option<ServerRecord> {
        let name = self.required_field("Server name", old.map(|s| s.name.as_str()))?;
        let url = self.required_field("Server URL", old.map(|s| s.url.as_str()))?;

        let previous_key = old.and_then(|s| s.api_key.as_deref());
        let key_input = self.prompt.input("API key (optional)", "", true)?;
        let api_key = match (key_input.trim(), previous_key) {
            ("", Some(previous)) => Some(previous.to_string()),
            ("", None) => None,
            (typed, _) => Some(typed.to_string()),
        };

        let headers_input = self
            .prompt
            .input("Extra headers as JSON object (optional)", "{}", false)?;
        let headers = match headers_input.trim() {
            "" => old.and_then(|s| s.headers.clone()),
            text => match serde_json::from_str::<BTreeMap<String, String>>(text) {
                Ok(map) if map.is_empty() => None,
                Ok(map) => Some(map),
                Err(e) => {
                    self.display
                        .error(&format!("Headers are not a valid JSON object of strings: {e}"));
                    return None;
                }
            },
        };

        let mut record = ServerRecord::new(name, url);
        record.api_key = api_key;
        record.headers = headers;
        Some(record)
    }

    /// One required prompt: empty keeps `previous` when editing, cancels when
    /// adding.
    fn required_field(&self, label: &str, previous: Option<&str>) -> Option<String> {
        let answer = self.prompt.input(label, previous.unwrap_or(""), false)?;
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return previous.map(ToString::to_string);
        }
        Some(trimmed.to_string())
    }

    /// Optional JSON body for POST/PUT. Invalid JSON is reported immediately
    /// and never sent; `Err(())` aborts the flow.
    fn read_json_body(&self) -> Result<Option<Value>, ()> {
        let Some(text) = self
            .prompt
            .input("Enter request body (JSON, optional)", "{}", false)
        else {
            return Err(());
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(text.trim()) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.display
                    .error(&format!("Request error: request body is not valid JSON: {e}"));
                Err(())
            }
        }
    }
}
