use serde::{Serialize, de::DeserializeOwned};
use tauri_wasm::{args, invoke};
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvokePayload<'a, A: Serialize + ?Sized> {
  args: &'a A,
  request_id: String,
}

/// Bridge to the backend commands. Every call carries a fresh request
/// id that the backend echoes into its logs.
pub async fn invoke_tauri<R, A>(cmd: &str, args_payload: &A) -> Result<R, String>
where
  R: DeserializeOwned,
  A: Serialize + ?Sized,
{
  let request_id = Uuid::new_v4().to_string();
  tracing::debug!(cmd, request_id, "invoking backend command");

  let payload = args(&InvokePayload {
    args: args_payload,
    request_id,
  })
  .map_err(|e| format!("failed to encode args: {e}"))?;
  let value = invoke(cmd)
    .with_args(payload)
    .await
    .map_err(|e| format!("invoke error: {e:?}"))?;

  serde_wasm_bindgen::from_value(value).map_err(|e| format!("decode error: {e}"))
}
