//! Subtyping and assignability over interned types.

use crate::core::type_name::PrimitiveType;
use crate::model::universe::{DeclId, TypeData, TypeId, Universe, OBJECT_DECL};
use std::collections::{HashSet, VecDeque};

/// Whether `sub` is a subtype of `sup`.
///
/// Erroneous types are compatible with everything. Wildcards are only
/// compared through containment of type arguments.
pub(crate) fn is_subtype(u: &Universe, sub: TypeId, sup: TypeId) -> bool {
    if sub == sup {
        return true;
    }
    let sub_data = u.data(sub);
    let sup_data = u.data(sup);

    match (&sub_data, &sup_data) {
        (TypeData::Error { .. } | TypeData::Unresolved { .. }, _)
        | (_, TypeData::Error { .. } | TypeData::Unresolved { .. }) => true,
        (TypeData::Primitive(from), TypeData::Primitive(to)) => widens(*from, *to),
        (TypeData::Null, target) => is_reference(target),
        (_, TypeData::Declared { decl, .. }) if *decl == OBJECT_DECL => is_reference(&sub_data),
        (TypeData::Array { component: a }, TypeData::Array { component: b }) => {
            match (u.data(*a), u.data(*b)) {
                (TypeData::Primitive(x), TypeData::Primitive(y)) => x == y,
                (TypeData::Primitive(_), _) | (_, TypeData::Primitive(_)) => false,
                _ => is_subtype(u, *a, *b),
            }
        }
        (TypeData::TypeVar { .. }, _) => u
            .bounds_of(sub)
            .into_iter()
            .any(|bound| is_subtype(u, bound, sup)),
        (TypeData::Declared { .. }, TypeData::Declared { decl, args }) => {
            declared_subtype(u, sub, *decl, args)
        }
        _ => false,
    }
}

/// Whether a value of type `from` can be assigned to `to`.
///
/// Subtyping plus boxing, unboxing with widening, and unchecked conversion
/// from a raw type.
pub(crate) fn is_assignable(u: &Universe, from: TypeId, to: TypeId) -> bool {
    if is_subtype(u, from, to) {
        return true;
    }
    match (u.data(from), u.data(to)) {
        (TypeData::Primitive(primitive), _) => {
            u.find_decl(&primitive.boxed()).is_some_and(|decl| {
                let boxed = u.intern(TypeData::Declared {
                    decl,
                    args: Vec::new(),
                });
                is_subtype(u, boxed, to)
            })
        }
        (TypeData::Declared { decl, .. }, TypeData::Primitive(target)) => u
            .decl(decl)
            .and_then(|d| PrimitiveType::unboxed(&d.name))
            .is_some_and(|unboxed| widens(unboxed, target)),
        (TypeData::Declared { args, .. }, TypeData::Declared { decl, .. }) if args.is_empty() => {
            declared_subtype(u, from, decl, &[])
        }
        _ => false,
    }
}

fn is_reference(data: &TypeData) -> bool {
    matches!(
        data,
        TypeData::Declared { .. }
            | TypeData::Error { .. }
            | TypeData::Unresolved { .. }
            | TypeData::Array { .. }
            | TypeData::TypeVar { .. }
            | TypeData::Null
    )
}

fn widens(from: PrimitiveType, to: PrimitiveType) -> bool {
    use PrimitiveType::*;
    from == to
        || matches!(
            (from, to),
            (Byte, Short | Int | Long | Float | Double)
                | (Short | Char, Int | Long | Float | Double)
                | (Int, Long | Float | Double)
                | (Long, Float | Double)
                | (Float, Double)
        )
}

/// Walk the supertypes of `sub` looking for `target` with compatible arguments.
/// An empty `target_args` matches any parameterization.
fn declared_subtype(u: &Universe, sub: TypeId, target: DeclId, target_args: &[TypeId]) -> bool {
    let mut queue = VecDeque::from([sub]);
    let mut seen = HashSet::new();

    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        if let TypeData::Declared { decl, args } = u.data(current) {
            if decl == target {
                if target_args.is_empty()
                    || (args.len() == target_args.len()
                        && target_args
                            .iter()
                            .zip(&args)
                            .all(|(&t, &a)| contains(u, t, a)))
                {
                    return true;
                }
                continue;
            }
        }
        queue.extend(u.super_type_ids(current));
    }
    false
}

/// Type argument containment: whether `target` admits `arg`.
fn contains(u: &Universe, target: TypeId, arg: TypeId) -> bool {
    if target == arg {
        return true;
    }
    let TypeData::Wildcard { extends, super_ } = u.data(target) else {
        return false;
    };
    let (arg_upper, arg_lower) = match u.data(arg) {
        TypeData::Wildcard {
            extends: arg_extends,
            super_: arg_super,
        } => (arg_extends.unwrap_or_else(|| u.object().id), arg_super),
        _ => (arg, Some(arg)),
    };

    let upper_ok = extends.map_or(true, |bound| is_subtype(u, arg_upper, bound));
    let lower_ok = super_.map_or(true, |bound| {
        arg_lower.is_some_and(|lower| is_subtype(u, bound, lower))
    });
    upper_ok && lower_ok
}
