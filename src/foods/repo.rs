use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One food-donation document: the store-generated id plus the
/// caller-supplied fields, held as-is in a JSONB column. No schema is
/// imposed on `doc`.
#[derive(Debug, Clone, FromRow)]
pub struct FoodRecord {
    pub id: Uuid,
    pub doc: Value,
}

// Flattens to `{"_id": ..., <doc fields>}` so responses carry the store
// identity alongside the document, matching the original wire shape.
impl Serialize for FoodRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("_id", &self.id)?;
        if let Value::Object(fields) = &self.doc {
            for (key, value) in fields {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

pub async fn list_top_by_quantity(db: &PgPool, limit: i64) -> anyhow::Result<Vec<FoodRecord>> {
    let rows = sqlx::query_as::<_, FoodRecord>(
        r#"
        SELECT id, doc
        FROM foods
        ORDER BY doc->'foodQuantity' DESC NULLS LAST
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_available(db: &PgPool) -> anyhow::Result<Vec<FoodRecord>> {
    let rows = sqlx::query_as::<_, FoodRecord>(
        r#"
        SELECT id, doc
        FROM foods
        WHERE doc->>'foodStatus' = 'available'
        ORDER BY doc->'expireDate' ASC NULLS LAST
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Stores the payload verbatim as a new document.
pub async fn insert(db: &PgPool, payload: &Value) -> anyhow::Result<InsertResult> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO foods (doc)
        VALUES ($1)
        RETURNING id
        "#,
    )
    .bind(payload)
    .fetch_one(db)
    .await?;
    Ok(InsertResult {
        acknowledged: true,
        inserted_id: id,
    })
}

pub async fn get_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FoodRecord>> {
    let row = sqlx::query_as::<_, FoodRecord>(
        r#"
        SELECT id, doc
        FROM foods
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Merges `patch` into the document's top-level fields. An absent target
/// record is not an error; the result reports a modified count of zero.
pub async fn update_fields(db: &PgPool, id: Uuid, patch: &Value) -> anyhow::Result<UpdateResult> {
    let result = sqlx::query(
        r#"
        UPDATE foods
        SET doc = doc || $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(patch)
    .execute(db)
    .await?;
    let matched = result.rows_affected();
    Ok(UpdateResult {
        acknowledged: true,
        matched_count: matched,
        modified_count: matched,
    })
}

pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<DeleteResult> {
    let result = sqlx::query(
        r#"
        DELETE FROM foods
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(DeleteResult {
        acknowledged: true,
        deleted_count: result.rows_affected(),
    })
}

/// All documents carrying the named top-level field, regardless of value.
pub async fn find_where_field_exists(db: &PgPool, field: &str) -> anyhow::Result<Vec<FoodRecord>> {
    let rows = sqlx::query_as::<_, FoodRecord>(
        r#"
        SELECT id, doc
        FROM foods
        WHERE jsonb_exists(doc, $1)
        "#,
    )
    .bind(field)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Exact-match filter on a dotted field path, e.g. `donator.email` or
/// `requestedEmail`. Unbounded, unsorted.
pub async fn find_by_field_eq(
    db: &PgPool,
    path: &str,
    value: &str,
) -> anyhow::Result<Vec<FoodRecord>> {
    let rows = sqlx::query_as::<_, FoodRecord>(
        r#"
        SELECT id, doc
        FROM foods
        WHERE doc #>> string_to_array($1, '.') = $2
        "#,
    )
    .bind(path)
    .bind(value)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_serializes_with_id_and_doc_fields() {
        let record = FoodRecord {
            id: Uuid::nil(),
            doc: json!({
                "foodName": "Rice",
                "foodQuantity": 4,
                "donator": { "email": "a@x.com" }
            }),
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            value["_id"],
            json!("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(value["foodName"], json!("Rice"));
        assert_eq!(value["foodQuantity"], json!(4));
        assert_eq!(value["donator"]["email"], json!("a@x.com"));
    }

    #[test]
    fn record_with_non_object_doc_serializes_id_only() {
        let record = FoodRecord {
            id: Uuid::nil(),
            doc: json!("not an object"),
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value.as_object().expect("object").len(), 1);
    }

    #[test]
    fn mutation_results_use_camel_case() {
        let insert = serde_json::to_value(InsertResult {
            acknowledged: true,
            inserted_id: Uuid::nil(),
        })
        .expect("serialize");
        assert!(insert.get("insertedId").is_some());

        let update = serde_json::to_value(UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: 1,
        })
        .expect("serialize");
        assert_eq!(update["matchedCount"], 1);
        assert_eq!(update["modifiedCount"], 1);

        let delete = serde_json::to_value(DeleteResult {
            acknowledged: true,
            deleted_count: 0,
        })
        .expect("serialize");
        assert_eq!(delete["deletedCount"], 0);
    }
}
