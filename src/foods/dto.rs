use serde::Deserialize;
use serde_json::{Map, Value};

/// Patch applied when a food is requested: status, requested date and the
/// requester's email. Anything else in the body is dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPatch {
    pub food_status: Option<Value>,
    pub requested_date: Option<Value>,
    pub requested_email: Option<Value>,
}

impl RequestPatch {
    pub fn into_merge_doc(self) -> Value {
        let mut fields = Map::new();
        put(&mut fields, "foodStatus", self.food_status);
        put(&mut fields, "requestedDate", self.requested_date);
        put(&mut fields, "requestedEmail", self.requested_email);
        Value::Object(fields)
    }
}

/// Patch applied when the donor edits a listing. Status and requester
/// fields never move through this shape.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPatch {
    pub food_name: Option<Value>,
    pub food_image: Option<Value>,
    pub food_quantity: Option<Value>,
    pub pickup_location: Option<Value>,
    pub expire_date: Option<Value>,
    pub additional_notes: Option<Value>,
}

impl EditPatch {
    pub fn into_merge_doc(self) -> Value {
        let mut fields = Map::new();
        put(&mut fields, "foodName", self.food_name);
        put(&mut fields, "foodImage", self.food_image);
        put(&mut fields, "foodQuantity", self.food_quantity);
        put(&mut fields, "pickupLocation", self.pickup_location);
        put(&mut fields, "expireDate", self.expire_date);
        put(&mut fields, "additionalNotes", self.additional_notes);
        Value::Object(fields)
    }
}

fn put(fields: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        fields.insert(key.to_string(), v);
    }
}
