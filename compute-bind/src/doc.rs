//! Help text assembled from descriptor metadata.

use std::fmt::Write;

use compute_core::{FunctionDescriptor, FunctionKind, OptionsClass};

/// Build the help text for one function.
///
/// Sections, in order: summary, description, parameters (data arguments,
/// configuration fields, `options`, `memory_pool`), addendum. The summary
/// and the `memory_pool` entry are always present.
pub fn assemble(
    descriptor: &FunctionDescriptor,
    options: Option<&dyn OptionsClass>,
    addendum: Option<&str>,
) -> String {
    let mut doc = String::new();

    let summary = descriptor.summary.trim().trim_end_matches('.');
    if summary.is_empty() {
        let noun = if descriptor.arity.num_args > 1 {
            "arguments"
        } else {
            "argument"
        };
        let _ = write!(
            doc,
            "Call compute function '{}' with the given {noun}",
            descriptor.name
        );
    } else {
        doc.push_str(summary);
    }
    doc.push_str(".\n\n");

    let description = descriptor.description.trim_end();
    if !description.is_empty() {
        doc.push_str(description);
        doc.push_str("\n\n");
    }

    doc.push_str("Parameters\n----------\n");
    let arg_type = match descriptor.kind {
        FunctionKind::Vector | FunctionKind::ScalarAggregate => "Array-like",
        _ => "Array-like or scalar-like",
    };
    for name in &descriptor.arg_names {
        let _ = writeln!(doc, "{name} : {arg_type}\n    Argument to compute function");
    }

    if let Some(class) = options {
        let class_name = class.name();
        for field in class.fields() {
            let _ = writeln!(
                doc,
                "{0} : optional\n    Parameter for {1} constructor. Either `options`\n    \
                 or `{0}` can be passed, but not both at the same time.",
                field.name, class_name
            );
        }
        let _ = writeln!(
            doc,
            "options : {class_name}, optional\n    Parameters altering compute function semantics."
        );
    }

    doc.push_str(
        "memory_pool : MemoryPool, optional\n    \
         If not passed, will allocate memory from the default memory pool.\n",
    );

    if let Some(addendum) = addendum {
        doc.push('\n');
        doc.push_str(addendum.trim_matches('\n'));
        doc.push('\n');
    }
    doc
}
