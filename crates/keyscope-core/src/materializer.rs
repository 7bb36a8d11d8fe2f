//! Typed value materialization for a single key.
//!
//! The key's type is asked of the store on every call and the matching
//! full read is issued. Composite values are read whole; there is no
//! pagination inside a value.

use tracing::{debug, info_span, Instrument};

use keyscope_observe::attrs;

use keyscope_types::error::ConsoleError;
use keyscope_types::value::{Value, ValueType};

use crate::store::KeyValueStore;

/// Read `key` and map it to its [`Value`].
///
/// - `string`, `list`, `set`, `hash` are read in full.
/// - `none` (the key does not exist) is `KeyNotFound`, as is a key of any
///   type that disappears between `TYPE` and the typed read.
/// - Any other type yields [`Value::Unsupported`] rather than an error, so a
///   listing never fails on an unusual key.
pub async fn materialize<S: KeyValueStore>(store: &S, key: &str) -> Result<Value, ConsoleError> {
    let span = info_span!(
        attrs::SPAN_MATERIALIZE,
        { attrs::DB_SYSTEM } = attrs::DB_SYSTEM_REDIS,
        { attrs::KEY } = %key,
        { attrs::VALUE_TYPE } = tracing::field::Empty,
    );

    async {
        let value_type = store.key_type(key).await?;
        tracing::Span::current().record(attrs::VALUE_TYPE, value_type.as_tag());

        let value = match value_type {
            ValueType::String => store
                .get(key)
                .await?
                .map(Value::Scalar)
                .ok_or_else(|| ConsoleError::KeyNotFound(key.to_string()))?,
            ValueType::List => Value::List(non_empty(key, store.list_range(key).await?)?),
            ValueType::Set => Value::Set(non_empty(key, store.set_members(key).await?)?),
            ValueType::Hash => Value::Mapping(non_empty(key, store.hash_fields(key).await?)?),
            ValueType::None => return Err(ConsoleError::KeyNotFound(key.to_string())),
            ValueType::Other(tag) => {
                debug!(value_type = %tag, "Unsupported value type");
                Value::Unsupported(tag)
            }
        };

        Ok::<_, ConsoleError>(value)
    }
    .instrument(span)
    .await
}

/// The store never keeps an empty list, set or hash, so an empty reply after
/// a composite `TYPE` means the key was removed in between.
fn non_empty<T>(key: &str, items: Vec<T>) -> Result<Vec<T>, ConsoleError> {
    if items.is_empty() {
        Err(ConsoleError::KeyNotFound(key.to_string()))
    } else {
        Ok(items)
    }
}
