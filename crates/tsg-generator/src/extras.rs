//! Runtime helpers needed by the generated guards.
//!
//! Runs after every declaration is compiled and reads the helper needs the
//! compiler recorded in the registry. Hook keys are fixed, so running it more
//! than once leaves the hooks unchanged.

use tracing::debug;

use crate::context::{GeneratorContext, HookSlot, PlainObjectCheck};

pub const PLAIN_OBJECT_CHECK_KEY: &str = "plainObjectCheck";
pub const HAS_OWN_KEY: &str = "hasOwn";

const IS_PLAIN_OBJECT_FUNCTION: &str = r#"function isPlainObject(value: unknown): value is Record<PropertyKey, any> {
  if (!value || typeof value !== "object") {
    return false;
  }

  const proto = Object.getPrototypeOf(value) as typeof Object.prototype | null;

  const hasObjectPrototype =
    proto === null ||
    proto === Object.prototype ||
    // Required to support node:vm.runInNewContext({})
    Object.getPrototypeOf(proto) === null;

  if (!hasObjectPrototype) {
    return false;
  }

  return Object.prototype.toString.call(value) === "[object Object]";
}"#;

const HAS_OWN_FUNCTION: &str = r#"function hasOwn<O extends object, P extends PropertyKey>(
  obj: O,
  prop: P,
): obj is O & Record<P, unknown> {
  return Object.hasOwn(obj, prop);
}"#;

/// Fill the hook slots with the helpers recorded as needed.
pub fn inject_runtime_helpers(ctx: &mut GeneratorContext) {
    if ctx.registry.needs_plain_object {
        let check = ctx.flags.plain_object_check;
        debug!(plain_object_check = check.as_str(), "injecting isPlainObject");
        match check {
            PlainObjectCheck::Simple => {}
            PlainObjectCheck::Insert => ctx.hooks.set(
                HookSlot::BeforeGenerated,
                PLAIN_OBJECT_CHECK_KEY,
                IS_PLAIN_OBJECT_FUNCTION,
            ),
            PlainObjectCheck::Lodash => ctx.hooks.set(
                HookSlot::BeforeAll,
                PLAIN_OBJECT_CHECK_KEY,
                r#"import { isPlainObject } from "lodash";"#,
            ),
            PlainObjectCheck::EsToolkit => ctx.hooks.set(
                HookSlot::BeforeAll,
                PLAIN_OBJECT_CHECK_KEY,
                r#"import { isPlainObject } from "es-toolkit";"#,
            ),
        }
    }

    if ctx.registry.needs_has_own {
        debug!("injecting hasOwn");
        ctx.hooks.set(HookSlot::BeforeGenerated, HAS_OWN_KEY, HAS_OWN_FUNCTION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Flags, HasOwnCheck};

    fn context(plain_object_check: PlainObjectCheck, has_own_check: HasOwnCheck) -> GeneratorContext {
        GeneratorContext::new(Flags {
            plain_object_check,
            has_own_check,
        })
    }

    #[test]
    fn nothing_is_injected_without_needs() {
        let mut ctx = context(PlainObjectCheck::Insert, HasOwnCheck::HasOwn);
        inject_runtime_helpers(&mut ctx);
        assert_eq!(ctx.hooks.blocks(HookSlot::BeforeAll).count(), 0);
        assert_eq!(ctx.hooks.blocks(HookSlot::BeforeGenerated).count(), 0);
    }

    #[test]
    fn insert_mode_inlines_both_helpers_in_order() {
        let mut ctx = context(PlainObjectCheck::Insert, HasOwnCheck::HasOwn);
        ctx.registry.needs_plain_object = true;
        ctx.registry.needs_has_own = true;
        inject_runtime_helpers(&mut ctx);
        inject_runtime_helpers(&mut ctx);

        let blocks: Vec<_> = ctx.hooks.blocks(HookSlot::BeforeGenerated).collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("function isPlainObject(value: unknown)"));
        assert!(blocks[1].starts_with("function hasOwn<O extends object, P extends PropertyKey>("));
        assert_eq!(ctx.hooks.blocks(HookSlot::BeforeAll).count(), 0);
    }

    #[test]
    fn library_modes_import_instead_of_inlining() {
        let mut lodash = context(PlainObjectCheck::Lodash, HasOwnCheck::In);
        lodash.registry.needs_plain_object = true;
        inject_runtime_helpers(&mut lodash);
        assert_eq!(
            lodash.hooks.get(HookSlot::BeforeAll, PLAIN_OBJECT_CHECK_KEY),
            Some(r#"import { isPlainObject } from "lodash";"#)
        );

        let mut es_toolkit = context(PlainObjectCheck::EsToolkit, HasOwnCheck::In);
        es_toolkit.registry.needs_plain_object = true;
        inject_runtime_helpers(&mut es_toolkit);
        assert_eq!(
            es_toolkit.hooks.get(HookSlot::BeforeAll, PLAIN_OBJECT_CHECK_KEY),
            Some(r#"import { isPlainObject } from "es-toolkit";"#)
        );
        assert_eq!(es_toolkit.hooks.blocks(HookSlot::BeforeGenerated).count(), 0);
    }
}
