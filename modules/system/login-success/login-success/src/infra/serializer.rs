use bytes::Bytes;
use login_success_sdk::{LoginSuccessError, OutcomePayload, PayloadSerializer};

/// `serde_json` encoder for outcome payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPayloadSerializer;

impl PayloadSerializer for JsonPayloadSerializer {
    fn serialize(&self, payload: &OutcomePayload) -> Result<Bytes, LoginSuccessError> {
        serde_json::to_vec(payload)
            .map(Bytes::from)
            .map_err(|e| LoginSuccessError::Transport(e.to_string()))
    }
}
