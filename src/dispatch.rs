//! Command dispatcher: argument-shape rules and action execution.
//!
//! | action | requires | forbids |
//! |--------|----------|---------|
//! | `get` | - | payload |
//! | `post` | payload | key |
//! | `put` | payload, key | - |
//! | `delete` | key | payload |
//!
//! [`Request::check_shape`] enforces the table without touching the
//! filesystem; [`Session::execute`] then runs the action.

use std::fmt;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{Config, Environment, Fs, Record, RecordStore, TmpsError, validate};

/// The four actions of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Action {
    /// List all records, or one with a key.
    Get,
    /// Create a record from a payload.
    Post,
    /// Change the mode of a record from a payload.
    Put,
    /// Remove a record by key.
    Delete,
}

impl Action {
    /// Lowercase name, as typed on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Post => "post",
            Action::Put => "put",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation: an action plus its optional payload and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// What to do.
    pub action: Action,
    /// JSON payload (`-j`).
    pub json: Option<String>,
    /// Primary key (`-k`).
    pub pk: Option<String>,
}

impl Request {
    /// Create a request.
    pub fn new(action: Action, json: Option<String>, pk: Option<String>) -> Self {
        Self { action, json, pk }
    }

    /// Check the payload/key combination for the action.
    ///
    /// Every violated rule is reported in one error.
    ///
    /// # Errors
    ///
    /// [`TmpsError::ArgumentShape`] on any violation.
    pub fn check_shape(&self) -> Result<(), TmpsError> {
        let has_json = self.json.is_some();
        let has_pk = self.pk.is_some();
        let mut violations = Vec::new();
        match self.action {
            Action::Get => {
                if has_json {
                    violations.push("must not have json");
                }
            }
            Action::Post => {
                if !has_json {
                    violations.push("need json");
                }
                if has_pk {
                    violations.push("must not have pk");
                }
            }
            Action::Put => {
                if !has_json {
                    violations.push("need json");
                }
                if !has_pk {
                    violations.push("need pk");
                }
            }
            Action::Delete => {
                if has_json {
                    violations.push("must not have json");
                }
                if !has_pk {
                    violations.push("need pk");
                }
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(TmpsError::ArgumentShape {
                action: self.action.as_str(),
                reason: violations.join("; "),
            })
        }
    }
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A single record (get with key, post, put).
    Record(Record),
    /// Every record of the environment (get without key).
    Records(Vec<Record>),
    /// The record was removed; nothing to print.
    Deleted,
}

impl Outcome {
    /// Render as pretty JSON: sorted keys, 4-space indent.
    ///
    /// Returns `None` for [`Outcome::Deleted`].
    pub fn to_json(&self) -> Result<Option<String>, TmpsError> {
        match self {
            Outcome::Record(record) => to_pretty_json(record).map(Some),
            Outcome::Records(records) => to_pretty_json(records).map(Some),
            Outcome::Deleted => Ok(None),
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, TmpsError> {
    // Going through Value sorts object keys.
    let value = serde_json::to_value(value)?;
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| TmpsError::Serialization(e.to_string()))
}

/// A record store bound to the environment of one invocation.
#[derive(Debug)]
pub struct Session<B> {
    store: RecordStore<B>,
    env: Environment,
}

impl<B: Fs> Session<B> {
    /// Resolve `env` against `config` and open the store.
    ///
    /// Opening creates the directories of all configured environments, not
    /// only the targeted one.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::UnknownEnvironment`] if `env` is not configured
    /// - backend failures while creating directories
    pub fn open(backend: B, config: Config, env: &str) -> Result<Self, TmpsError> {
        let env = config.environment(env)?;
        let store = RecordStore::open(backend, config)?;
        Ok(Self { store, env })
    }

    /// The targeted environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The underlying store.
    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    /// Check the request shape, then run it.
    pub fn execute(&self, request: &Request) -> Result<Outcome, TmpsError> {
        request.check_shape()?;
        let _span = tracing::debug_span!("execute", action = %request.action, env = %self.env).entered();
        match (request.action, request.json.as_deref(), request.pk.as_deref()) {
            (Action::Get, None, None) => self.get_all(),
            (Action::Get, None, Some(pk)) => self.get(pk),
            (Action::Post, Some(json), None) => self.post(json),
            (Action::Put, Some(json), Some(pk)) => self.put(pk, json),
            (Action::Delete, None, Some(pk)) => self.delete(pk),
            _ => unreachable!("request shape already checked"),
        }
    }

    /// Every record of the environment.
    pub fn get_all(&self) -> Result<Outcome, TmpsError> {
        self.store.list(&self.env).map(Outcome::Records)
    }

    /// One record by key.
    pub fn get(&self, pk: &str) -> Result<Outcome, TmpsError> {
        self.store.read(&self.env, pk).map(Outcome::Record)
    }

    /// Create the record described by `json`.
    pub fn post(&self, json: &str) -> Result<Outcome, TmpsError> {
        let record = validate::parse_payload(json, &self.env)?;
        self.store
            .create(&self.env, &record.name, record.mode)
            .map(Outcome::Record)
    }

    /// Update the record `pk` from `json`; the payload name must equal `pk`.
    pub fn put(&self, pk: &str, json: &str) -> Result<Outcome, TmpsError> {
        let record = validate::parse_payload(json, &self.env)?;
        if record.name != pk {
            return Err(TmpsError::KeyMismatch {
                pk: pk.to_string(),
                name: record.name,
            });
        }
        self.store
            .update(&self.env, pk, record.mode)
            .map(Outcome::Record)
    }

    /// Remove the record `pk`.
    pub fn delete(&self, pk: &str) -> Result<Outcome, TmpsError> {
        self.store.delete(&self.env, pk).map(|()| Outcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Mode};

    fn request(action: Action, json: Option<&str>, pk: Option<&str>) -> Request {
        Request::new(action, json.map(String::from), pk.map(String::from))
    }

    #[test]
    fn shape_table() {
        let j = Some("{}");
        let k = Some("a");
        let cases = [
            (Action::Get, None, None, true),
            (Action::Get, None, k, true),
            (Action::Get, j, None, false),
            (Action::Get, j, k, false),
            (Action::Post, j, None, true),
            (Action::Post, None, None, false),
            (Action::Post, j, k, false),
            (Action::Put, j, k, true),
            (Action::Put, j, None, false),
            (Action::Put, None, k, false),
            (Action::Delete, None, k, true),
            (Action::Delete, None, None, false),
            (Action::Delete, j, k, false),
        ];
        for (action, json, pk, ok) in cases {
            let result = request(action, json, pk).check_shape();
            assert_eq!(result.is_ok(), ok, "{action} json={json:?} pk={pk:?}");
            if let Err(e) = result {
                assert_eq!(e.kind(), ErrorKind::ArgumentShape);
            }
        }
    }

    #[test]
    fn shape_reports_every_violation() {
        let err = request(Action::Delete, Some("{}"), None)
            .check_shape()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Args check: delete method: must not have json; need pk"
        );
    }

    #[test]
    fn single_record_renders_sorted_with_four_spaces() {
        let outcome = Outcome::Record(Record::new("dev", "Maurice", Mode::from_bits(0o644)));
        let json = outcome.to_json().unwrap().unwrap();
        assert_eq!(
            json,
            "{\n    \"env\": \"dev\",\n    \"mode\": \"0644\",\n    \"name\": \"Maurice\"\n}"
        );
    }

    #[test]
    fn empty_collection_renders_as_empty_array() {
        let json = Outcome::Records(vec![]).to_json().unwrap().unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn deleted_renders_nothing() {
        assert_eq!(Outcome::Deleted.to_json().unwrap(), None);
    }

    #[test]
    fn action_names() {
        assert_eq!(Action::Get.to_string(), "get");
        assert_eq!(Action::Delete.as_str(), "delete");
    }
}
