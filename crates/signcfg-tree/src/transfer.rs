//! Schema-driven field copy between two record representations

use crate::binding::NodeFactory;
use crate::node::Record;
use crate::schema::{FieldType, Structure};
use crate::Result;

/// Copy every field `structure` describes for `kind` from `source` into
/// `dest`, recursing into nested kinds.
///
/// Scalars are copied as-is and an absent source scalar clears the
/// destination. A singular nested field reuses the destination's existing
/// node when there is one; repeated nested fields are rebuilt from scratch.
/// New destination nodes come from `factory`, which is what decides the
/// destination representation.
pub fn copy_fields<S, D, F>(
    source: &S,
    dest: &mut D,
    structure: &Structure,
    kind: &str,
    factory: &F,
) -> Result<()>
where
    S: Record,
    D: Record,
    F: NodeFactory<D>,
{
    let schema = structure.kind(kind)?;

    for field in &schema.fields {
        match &field.ty {
            FieldType::Struct(nested_kind) if field.cardinality.is_many() => {
                let mut copied = Vec::with_capacity(source.nested(&field.name).len());
                for child in source.nested(&field.name) {
                    let mut target = factory.create(nested_kind);
                    copy_fields(child, &mut target, structure, nested_kind, factory)?;
                    copied.push(target);
                }
                dest.set_nested(&field.name, copied);
            }
            FieldType::Struct(nested_kind) => match source.nested(&field.name).first() {
                Some(child) => {
                    let mut target = dest
                        .take_nested(&field.name)
                        .into_iter()
                        .next()
                        .unwrap_or_else(|| factory.create(nested_kind));
                    copy_fields(child, &mut target, structure, nested_kind, factory)?;
                    dest.set_nested(&field.name, vec![target]);
                }
                None => dest.set_nested(&field.name, Vec::new()),
            },
            _ => {
                let value = source.scalar(&field.name).map(str::to_string);
                dest.set_scalar(&field.name, value);
            }
        }
    }

    tracing::trace!(kind, source = source.kind(), dest = dest.kind(), "copied fields");
    Ok(())
}
