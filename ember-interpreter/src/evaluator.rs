//! Tree-walking evaluator for the Ember interpreter.
//!
//! Evaluation is a recursive walk over the AST against an [`Environment`].
//! Runtime faults and `return` both leave through the `Err` side as an
//! [`Unwind`], so every `?` in an expression position propagates them. A
//! function call catches `Unwind::Return`; the program catches both.

use std::rc::Rc;

use ember_parser::{
    BlockStatement, Expression, HashLiteral, InfixOperator, PrefixOperator, Program, Span,
    Statement,
};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::builtins;
use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::object::{Function, HashPair, Object};

/// Non-local exit out of an expression or statement
#[derive(Debug)]
enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type Flow<T> = std::result::Result<T, Unwind>;

/// Evaluate a program, materialising a runtime fault as [`Object::Error`]
///
/// Always yields an object: a program whose last statement produced no value
/// (an empty program, or one ending in `let`) evaluates to `null`.
pub fn eval(program: &Program, env: &Environment) -> Object {
    match eval_program(program, env) {
        Ok(value) => value.unwrap_or(Object::Null),
        Err(error) => Object::Error(error.to_string()),
    }
}

/// Evaluate a program, keeping the typed error
///
/// Returns `Ok(None)` when the last statement produced no value.
pub fn eval_program(program: &Program, env: &Environment) -> Result<Option<Object>> {
    match eval_statements(&program.statements, env) {
        Ok(value) => Ok(value),
        Err(Unwind::Return(value)) => Ok(Some(value)),
        Err(Unwind::Error(error)) => Err(error),
    }
}

/// Evaluate statements in order; the last one's value is the result
fn eval_statements(statements: &[Statement], env: &Environment) -> Flow<Option<Object>> {
    let mut result = None;

    for statement in statements {
        result = eval_statement(statement, env)?;
    }

    Ok(result)
}

fn eval_block(block: &BlockStatement, env: &Environment) -> Flow<Option<Object>> {
    eval_statements(&block.statements, env)
}

fn eval_statement(statement: &Statement, env: &Environment) -> Flow<Option<Object>> {
    match statement {
        Statement::Let(let_stmt) => {
            let value = eval_expression(&let_stmt.value, env)?;
            env.set(let_stmt.name.name.as_str(), value);
            Ok(None)
        }
        Statement::Return(return_stmt) => {
            let value = eval_expression(&return_stmt.value, env)?;
            Err(Unwind::Return(value))
        }
        Statement::Expression(expr_stmt) => eval_expression(&expr_stmt.expression, env).map(Some),
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Environment) -> Flow<Object> {
    match expression {
        Expression::Identifier(ident) => Ok(env
            .get(&ident.name)
            .or_else(|| builtins::lookup(&ident.name))
            .ok_or_else(|| RuntimeError::identifier_not_found(&ident.name, ident.token.span))?),

        Expression::Integer(lit) => Ok(Object::Integer(lit.value)),
        Expression::Boolean(lit) => Ok(Object::Boolean(lit.value)),
        Expression::String(lit) => Ok(Object::String(lit.value.clone())),

        Expression::Array(lit) => {
            let elements = eval_expressions(&lit.elements, env)?;
            Ok(Object::array(elements))
        }

        Expression::Hash(lit) => eval_hash_literal(lit, env),

        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env)?;
            Ok(eval_prefix(prefix.operator, right, prefix.token.span)?)
        }

        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, env)?;
            let right = eval_expression(&infix.right, env)?;
            Ok(eval_infix(infix.operator, left, right, infix.token.span)?)
        }

        Expression::If(if_expr) => {
            let condition = eval_expression(&if_expr.condition, env)?;
            let branch = if condition.is_truthy() {
                Some(&if_expr.consequence)
            } else {
                if_expr.alternative.as_ref()
            };

            match branch {
                Some(block) => Ok(eval_block(block, env)?.unwrap_or(Object::Null)),
                None => Ok(Object::Null),
            }
        }

        Expression::Function(literal) => Ok(Object::Function(Rc::new(Function {
            literal: Rc::clone(literal),
            env: env.clone(),
        }))),

        Expression::Call(call) => {
            let callee = eval_expression(&call.function, env)?;
            let arguments = eval_expressions(&call.arguments, env)?;
            Ok(apply_function(callee, arguments, call.token.span)?)
        }

        Expression::Index(index) => {
            let left = eval_expression(&index.left, env)?;
            let key = eval_expression(&index.index, env)?;
            Ok(eval_index(left, key, index.token.span)?)
        }
    }
}

/// Evaluate left to right, stopping at the first error or `return`
fn eval_expressions(expressions: &[Expression], env: &Environment) -> Flow<Vec<Object>> {
    expressions
        .iter()
        .map(|expression| eval_expression(expression, env))
        .collect()
}

fn eval_hash_literal(lit: &HashLiteral, env: &Environment) -> Flow<Object> {
    let mut pairs = IndexMap::with_capacity(lit.pairs.len());

    for (key_expr, value_expr) in &lit.pairs {
        let key = eval_expression(key_expr, env)?;
        let hash_key = key
            .hash_key()
            .ok_or_else(|| RuntimeError::unusable_hash_key(key.type_name(), key_expr.span()))?;
        let value = eval_expression(value_expr, env)?;

        pairs.insert(hash_key, HashPair { key, value });
    }

    Ok(Object::Hash(Rc::new(pairs)))
}

fn eval_prefix(operator: PrefixOperator, right: Object, span: Span) -> Result<Object> {
    match (operator, right) {
        (PrefixOperator::Bang, right) => Ok(Object::Boolean(!right.is_truthy())),
        (PrefixOperator::Minus, Object::Integer(value)) => Ok(Object::Integer(value.wrapping_neg())),
        (PrefixOperator::Plus, Object::Integer(value)) => Ok(Object::Integer(value)),
        (operator, right) => Err(RuntimeError::unknown_prefix_operator(
            operator.as_str(),
            right.type_name(),
            span,
        )),
    }
}

fn eval_infix(operator: InfixOperator, left: Object, right: Object, span: Span) -> Result<Object> {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r, span),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r, span),
        _ if left.type_name() != right.type_name() => Err(RuntimeError::type_mismatch(
            left.type_name(),
            operator.as_str(),
            right.type_name(),
            span,
        )),
        _ => match operator {
            InfixOperator::Equal => Ok(Object::Boolean(left.is_identical(&right))),
            InfixOperator::NotEqual => Ok(Object::Boolean(!left.is_identical(&right))),
            _ => Err(RuntimeError::unknown_infix_operator(
                left.type_name(),
                operator.as_str(),
                right.type_name(),
                span,
            )),
        },
    }
}

fn eval_integer_infix(operator: InfixOperator, left: i64, right: i64, span: Span) -> Result<Object> {
    let value = match operator {
        InfixOperator::Add => Object::Integer(left.wrapping_add(right)),
        InfixOperator::Subtract => Object::Integer(left.wrapping_sub(right)),
        InfixOperator::Multiply => Object::Integer(left.wrapping_mul(right)),
        InfixOperator::Divide => {
            if right == 0 {
                return Err(RuntimeError::division_by_zero(span));
            }
            Object::Integer(left.wrapping_div(right))
        }
        InfixOperator::Less => Object::Boolean(left < right),
        InfixOperator::Greater => Object::Boolean(left > right),
        InfixOperator::LessEqual => Object::Boolean(left <= right),
        InfixOperator::GreaterEqual => Object::Boolean(left >= right),
        InfixOperator::Equal => Object::Boolean(left == right),
        InfixOperator::NotEqual => Object::Boolean(left != right),
    };
    Ok(value)
}

fn eval_string_infix(operator: InfixOperator, left: &str, right: &str, span: Span) -> Result<Object> {
    let value = match operator {
        InfixOperator::Add => Object::String(format!("{left}{right}")),
        InfixOperator::Less => Object::Boolean(left < right),
        InfixOperator::Greater => Object::Boolean(left > right),
        InfixOperator::LessEqual => Object::Boolean(left <= right),
        InfixOperator::GreaterEqual => Object::Boolean(left >= right),
        InfixOperator::Equal => Object::Boolean(left == right),
        InfixOperator::NotEqual => Object::Boolean(left != right),
        InfixOperator::Subtract | InfixOperator::Multiply | InfixOperator::Divide => {
            return Err(RuntimeError::unknown_infix_operator(
                "STRING",
                operator.as_str(),
                "STRING",
                span,
            ));
        }
    };
    Ok(value)
}

fn eval_index(left: Object, index: Object, span: Span) -> Result<Object> {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(position)) => Ok(usize::try_from(*position)
            .ok()
            .and_then(|position| elements.get(position))
            .cloned()
            .unwrap_or(Object::Null)),
        (Object::Hash(pairs), _) => {
            let key = index
                .hash_key()
                .ok_or_else(|| RuntimeError::unusable_hash_key(index.type_name(), span))?;
            Ok(pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Object::Null))
        }
        _ => Err(RuntimeError::index_not_supported(
            left.type_name(),
            index.type_name(),
            span,
        )),
    }
}

/// Call a function or builtin with already-evaluated arguments
///
/// Parameters bind positionally in a fresh scope enclosed by the closure's
/// environment. Missing arguments stay unbound and extra ones are ignored.
pub fn apply_function(callee: Object, arguments: Vec<Object>, span: Span) -> Result<Object> {
    match callee {
        Object::Function(function) => {
            let parameters = &function.literal.parameters;
            debug!(
                arity = parameters.len(),
                arguments = arguments.len(),
                "calling function"
            );

            let call_env = Environment::enclosed(&function.env);
            for (parameter, argument) in parameters.iter().zip(arguments) {
                call_env.set(parameter.name.as_str(), argument);
            }

            match eval_block(&function.literal.body, &call_env) {
                Ok(value) => Ok(value.unwrap_or(Object::Null)),
                Err(Unwind::Return(value)) => Ok(value),
                Err(Unwind::Error(error)) => Err(error),
            }
        }
        Object::Builtin(builtin) => {
            trace!(name = builtin.name, arguments = arguments.len(), "calling builtin");
            (builtin.function)(&arguments).map_err(|error| error.with_span(span))
        }
        other => Err(RuntimeError::not_a_function(other.type_name(), span)),
    }
}
