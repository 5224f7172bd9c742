use std::collections::BTreeSet;

use log::debug;

use crate::ast::{Expression, Function, Program};
use crate::lexer::is_identifier;
use crate::library;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum CodegenError {
    #[error("Unexpected node '{0}'.")]
    UnexpectedNode(String),
}

/// Intrinsic names referenced so far.
pub type UsedIntrinsics = BTreeSet<String>;

fn check_name<T: std::fmt::Debug>(name: &str, node: &T) -> Result<(), CodegenError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(CodegenError::UnexpectedNode(format!("{:?}", node)))
    }
}

pub fn codegen_expr(expr: &Expression, used: &mut UsedIntrinsics) -> Result<String, CodegenError> {
    match expr {
        Expression::Literal(digits) => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CodegenError::UnexpectedNode(format!("{:?}", expr)));
            }
            Ok(digits.clone())
        }
        Expression::Variable(name) => {
            check_name(name, expr)?;
            Ok(name.clone())
        }
        Expression::Call(callee, args) => {
            check_name(callee, expr)?;
            if library::is_intrinsic(callee) {
                used.insert(callee.clone());
            }

            let mut gened_args = Vec::with_capacity(args.len());
            for arg in args {
                gened_args.push(codegen_expr(arg, used)?);
            }

            Ok(format!("{}({})", callee, gened_args.join(", ")))
        }
    }
}

/// Emits one definition followed by a newline, plus the `main();` call when
/// the function is named `main`.
pub fn codegen_fn(function: &Function, used: &mut UsedIntrinsics) -> Result<String, CodegenError> {
    let proto = &function.prototype;
    check_name(&proto.name, function)?;
    for arg in &proto.args {
        check_name(arg, function)?;
    }

    let body = match &function.body {
        Some(expr) => format!(" {}; ", codegen_expr(expr, used)?),
        None => " ".to_string(),
    };
    let js = format!("function {}({}) {{{}}}\n", proto.name, proto.args.join(", "), body);

    if proto.name == "main" {
        Ok(format!("{}main();\n", js))
    } else {
        Ok(js)
    }
}

fn codegen_definitions(
    program: &Program,
    used: &mut UsedIntrinsics,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    for function in program.functions() {
        out.push_str(&codegen_fn(function, used)?);
    }
    Ok(out)
}

/// Generates the full output: the user's definitions, a blank line, then the
/// source of every intrinsic the program calls.
pub fn codegen(program: &Program) -> Result<String, CodegenError> {
    let mut used = UsedIntrinsics::new();
    let definitions = codegen_definitions(program, &mut used)?;
    debug!("intrinsics used: {:?}", used);

    let intrinsics = library::entries()
        .filter(|intrinsic| used.contains(intrinsic.name))
        .map(|intrinsic| intrinsic.source)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!("{}\n{}", definitions, intrinsics).trim().to_string() + "\n")
}
