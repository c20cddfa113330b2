//! Finding a function's code by name or index.
use crate::core::types::ExternalKind;
use crate::core::{Code, ImportDesc, Index, KnownSection, NameSubsectionId, Section, SectionId};
use crate::decode::names::{NAME_SECTION, read_function_names, read_name_section};
use crate::decode::read_module;
use crate::decode::sections::{read_code_section, read_export_section, read_import_section};
use crate::diagnostics::Context;
use std::collections::HashMap;
use tracing::debug;

/// Function names gathered in one pass over a module, and where its code is.
///
/// Names come from function imports, then function exports, then the `name`
/// section. When two sources name the same string, the first one seen wins.
#[derive(Debug, Default)]
pub struct FunctionIndex<'a> {
    names: HashMap<&'a str, Index>,
    imported_functions: u32,
    code: Option<KnownSection<'a>>,
}

impl<'a> FunctionIndex<'a> {
    pub fn build(bytes: &'a [u8], cx: &Context<'_>) -> Self {
        let mut index = Self::default();
        for section in read_module(bytes, cx) {
            match section {
                Section::Known(known) => match known.id {
                    SectionId::Import => {
                        for import in read_import_section(known, cx) {
                            if let ImportDesc::Function(_) = import.desc {
                                let function = index.imported_functions;
                                index.imported_functions += 1;
                                index.insert(import.name, function);
                            }
                        }
                    }
                    SectionId::Export => {
                        for export in read_export_section(known, cx) {
                            if export.kind == ExternalKind::Function {
                                index.insert(export.name, export.index);
                            }
                        }
                    }
                    SectionId::Code => index.code = Some(known),
                    _ => {}
                },
                Section::Custom(custom) if custom.name == NAME_SECTION => {
                    for sub in read_name_section(custom, cx) {
                        if sub.id != NameSubsectionId::FunctionNames {
                            continue;
                        }
                        for assoc in read_function_names(sub, cx) {
                            index.insert(assoc.name, assoc.index);
                        }
                    }
                }
                Section::Custom(_) => {}
            }
        }
        debug!(
            names = index.names.len(),
            imported_functions = index.imported_functions,
            "indexed functions"
        );
        index
    }

    fn insert(&mut self, name: &'a str, function: Index) {
        self.names.entry(name).or_insert(function);
    }

    pub fn imported_function_count(&self) -> u32 {
        self.imported_functions
    }

    /// The index of the function called `name`, or `name` read as a decimal
    /// index if it is nothing but digits.
    pub fn lookup(&self, name: &str) -> Option<Index> {
        if let Some(&index) = self.names.get(name) {
            return Some(index);
        }
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        name.parse().ok()
    }

    /// The code entry of a defined function. Imported functions have none.
    pub fn code_for_function(&self, function: Index, cx: &Context<'_>) -> Option<Code<'a>> {
        let position = function.checked_sub(self.imported_functions)?;
        let code = self.code?;
        read_code_section(code, cx).nth(position as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NopDiagnostics;
    use crate::features::Features;

    fn wasm(text: &str) -> Vec<u8> {
        wat::parse_str(text).expect("valid module text")
    }

    #[test]
    fn names_from_imports_exports_and_name_section() {
        let bytes = wasm(
            r#"(module
                (import "env" "host" (func))
                (func $first)
                (func $second (export "run"))
                (func $third (export "host")))"#,
        );
        let cx = Context::new(Features::all(), &NopDiagnostics);
        let index = FunctionIndex::build(&bytes, &cx);

        assert_eq!(index.imported_function_count(), 1);
        // import wins over the export of the same name
        assert_eq!(index.lookup("host"), Some(0));
        assert_eq!(index.lookup("run"), Some(2));
        assert_eq!(index.lookup("first"), Some(1));
        assert_eq!(index.lookup("3"), Some(3));
        assert_eq!(index.lookup("nope"), None);
    }

    #[test]
    fn only_plain_digits_read_as_an_index() {
        let bytes = wasm(r#"(module (func $a) (func $b) (func $c) (func $d))"#);
        let cx = Context::new(Features::all(), &NopDiagnostics);
        let index = FunctionIndex::build(&bytes, &cx);

        assert_eq!(index.lookup("3"), Some(3));
        assert_eq!(index.lookup("+3"), None);
        assert_eq!(index.lookup(" 3"), None);
        assert_eq!(index.lookup(""), None);
        assert_eq!(index.lookup("99999999999"), None);
    }

    #[test]
    fn code_is_offset_by_imported_functions() {
        let bytes = wasm(
            r#"(module
                (import "env" "f" (func))
                (func (local i64))
                (func nop))"#,
        );
        let cx = Context::new(Features::all(), &NopDiagnostics);
        let index = FunctionIndex::build(&bytes, &cx);

        assert!(index.code_for_function(0, &cx).is_none());
        assert_eq!(index.code_for_function(1, &cx).map(|c| c.locals.len()), Some(1));
        let code = index.code_for_function(2, &cx).expect("defined function");
        assert_eq!(code.body.data.as_bytes(), &[0x01, 0x0B]);
        assert!(index.code_for_function(3, &cx).is_none());
    }
}
