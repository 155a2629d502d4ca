use keyring::Entry;

use crate::api::{Result, RosettaError};

const SERVICE_NAME: &str = "rosetta-client";

/// OS keychain storage for OAuth client secrets, keyed by client id.
pub struct CredentialStore;

impl CredentialStore {
    /// Store the client secret for a client id in the OS keychain
    pub fn store_secret(client_id: &str, secret: &str) -> Result<()> {
        let entry = Self::entry(client_id)?;
        entry
            .set_password(secret)
            .map_err(|e| keychain_error("store client secret", e))
    }

    /// Retrieve the client secret for a client id from the OS keychain
    pub fn get_secret(client_id: &str) -> Result<String> {
        let entry = Self::entry(client_id)?;
        entry
            .get_password()
            .map_err(|e| keychain_error("retrieve client secret", e))
    }

    pub fn delete_secret(client_id: &str) -> Result<()> {
        let entry = Self::entry(client_id)?;
        entry
            .delete_credential()
            .map_err(|e| keychain_error("delete client secret", e))
    }

    fn entry(client_id: &str) -> Result<Entry> {
        Entry::new(SERVICE_NAME, client_id).map_err(|e| keychain_error("create keyring entry", e))
    }
}

fn keychain_error(action: &str, err: keyring::Error) -> RosettaError {
    RosettaError::InvalidConfiguration(format!("Failed to {action}: {err}"))
}
