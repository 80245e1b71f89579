//! HTTP operations against the scripts collection.
//!
//! URL shapes:
//! - collection: `<server>/JSSResource/scripts` (JSON listing)
//! - element:    `<server>/JSSResource/scripts/id/<id>` (XML record)
//!
//! The element endpoint at id `0` is the create convention: the server
//! assigns a real id and echoes it in the response body.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use scriptyard_core::types::ScriptId;

use crate::error::JamfError;

/// One entry of the collection listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSummary {
    pub id: ScriptId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ScriptListing {
    scripts: Vec<ScriptSummary>,
}

/// The remote collaborator seam the orchestrator drives.
///
/// [`JamfClient`] is the production implementation; tests substitute their
/// own to exercise pipeline ordering without a server.
pub trait ScriptsRemote {
    /// `(id, name)` for every script on the server, in server order.
    fn list_summaries(&self) -> Result<Vec<ScriptSummary>, JamfError>;

    /// The raw XML envelope for one script.
    fn fetch_envelope(&self, id: ScriptId) -> Result<String, JamfError>;

    /// PUT an envelope at `id` (`0` = create). Success only on 200/201.
    /// Returns the response body — on create it carries the assigned id.
    fn create_or_replace(&self, id: ScriptId, envelope: &str) -> Result<String, JamfError>;

    /// DELETE the script at `id`.
    fn delete(&self, id: ScriptId) -> Result<(), JamfError>;
}

/// Blocking client carrying the collection URL and basic-auth header.
#[derive(Debug, Clone)]
pub struct JamfClient {
    scripts_url: String,
    authorization: String,
}

impl JamfClient {
    pub fn new(server_url: &str, username: &str, password: &str) -> Self {
        let base = server_url.trim_end_matches('/');
        let credentials = BASE64.encode(format!("{username}:{password}"));
        JamfClient {
            scripts_url: format!("{base}/JSSResource/scripts"),
            authorization: format!("Basic {credentials}"),
        }
    }

    /// Collection URL (useful in diagnostics).
    pub fn scripts_url(&self) -> &str {
        &self.scripts_url
    }

    fn element_url(&self, id: ScriptId) -> String {
        format!("{}/id/{}", self.scripts_url, id)
    }
}

impl ScriptsRemote for JamfClient {
    fn list_summaries(&self) -> Result<Vec<ScriptSummary>, JamfError> {
        let url = self.scripts_url.clone();
        tracing::debug!(%url, "listing scripts");
        let response = ureq::get(&url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| read_error(&url, e))?;
        let listing: ScriptListing = response
            .into_json()
            .map_err(|source| JamfError::Payload { url, source })?;
        Ok(listing.scripts)
    }

    fn fetch_envelope(&self, id: ScriptId) -> Result<String, JamfError> {
        let url = self.element_url(id);
        tracing::debug!(%url, "fetching envelope");
        let response = ureq::get(&url)
            .set("Authorization", &self.authorization)
            .set("Accept", "text/xml")
            .call()
            .map_err(|e| read_error(&url, e))?;
        response
            .into_string()
            .map_err(|source| JamfError::Payload { url, source })
    }

    fn create_or_replace(&self, id: ScriptId, envelope: &str) -> Result<String, JamfError> {
        let url = self.element_url(id);
        tracing::debug!(%url, "uploading envelope");
        let response = ureq::put(&url)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "text/xml")
            .send_string(envelope)
            .map_err(|e| write_error(&url, e))?;
        let status = response.status();
        if status != 200 && status != 201 {
            return Err(JamfError::RemoteRejected { status, url });
        }
        response
            .into_string()
            .map_err(|source| JamfError::Payload { url, source })
    }

    fn delete(&self, id: ScriptId) -> Result<(), JamfError> {
        let url = self.element_url(id);
        tracing::debug!(%url, "deleting script");
        ureq::delete(&url)
            .set("Authorization", &self.authorization)
            .call()
            .map_err(|e| write_error(&url, e))?;
        Ok(())
    }
}

fn read_error(url: &str, err: ureq::Error) -> JamfError {
    match err {
        ureq::Error::Status(status, _) => JamfError::RemoteUnavailable {
            status,
            url: url.to_owned(),
        },
        other => JamfError::Transport {
            url: url.to_owned(),
            source: Box::new(other),
        },
    }
}

fn write_error(url: &str, err: ureq::Error) -> JamfError {
    match err {
        ureq::Error::Status(status, _) => JamfError::RemoteRejected {
            status,
            url: url.to_owned(),
        },
        other => JamfError::Transport {
            url: url.to_owned(),
            source: Box::new(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_the_scripts_collection() {
        let client = JamfClient::new("https://jpc.example.com/", "api", "pw");
        assert_eq!(
            client.scripts_url(),
            "https://jpc.example.com/JSSResource/scripts"
        );
        assert_eq!(
            client.element_url(ScriptId(12)),
            "https://jpc.example.com/JSSResource/scripts/id/12"
        );
        assert_eq!(
            client.element_url(ScriptId::UNASSIGNED),
            "https://jpc.example.com/JSSResource/scripts/id/0"
        );
    }

    #[test]
    fn basic_auth_header_is_encoded() {
        let client = JamfClient::new("https://jpc.example.com", "api", "pw");
        // base64("api:pw")
        assert_eq!(client.authorization, "Basic YXBpOnB3");
    }

    #[test]
    fn listing_payload_deserializes() {
        let json = r#"{"scripts": [{"id": 12, "name": "admin-1.1.sh"}, {"id": 40, "name": "b.sh"}]}"#;
        let listing: ScriptListing = serde_json::from_str(json).expect("parse");
        assert_eq!(listing.scripts.len(), 2);
        assert_eq!(listing.scripts[0].id, ScriptId(12));
        assert_eq!(listing.scripts[0].name, "admin-1.1.sh");
    }
}
