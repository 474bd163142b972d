//! Conditional block helpers.
//!
//! `{{#gt a b}}..{{else}}..{{/gt}}` compares two positional operands, the
//! `if_*`/`unless_*` family compares its operand with the `compare=` hash
//! argument. Used as a sub-expression (`(gt a b)`) every predicate yields a
//! boolean.

use std::cmp::Ordering;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    ScopedJson,
};
use serde_json::Value as Json;

use super::{BlockOptions, Params, Registrar};
use crate::values;

/// Relation between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    And,
    Or,
}

impl Relation {
    pub fn holds(self, left: Option<&Json>, right: Option<&Json>) -> bool {
        match self {
            Relation::Equal => values::strict_equals_opt(left, right),
            Relation::NotEqual => !values::strict_equals_opt(left, right),
            Relation::Greater => values::compare(left, right) == Some(Ordering::Greater),
            Relation::GreaterOrEqual => matches!(
                values::compare(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Relation::Less => values::compare(left, right) == Some(Ordering::Less),
            Relation::LessOrEqual => matches!(
                values::compare(left, right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Relation::And => values::is_truthy(left) && values::is_truthy(right),
            Relation::Or => values::is_truthy(left) || values::is_truthy(right),
        }
    }
}

/// Where the right-hand operand comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    /// Second positional parameter.
    Positional,
    /// The `compare=` hash argument.
    CompareHash,
}

pub struct ConditionHelper {
    name: &'static str,
    relation: Relation,
    operand: Operand,
    negate: bool,
}

impl ConditionHelper {
    fn evaluate(&self, h: &Helper) -> bool {
        let params = Params::new(self.name, h);
        let right = match self.operand {
            Operand::Positional => params.get(1),
            Operand::CompareHash => params.hash("compare"),
        };
        self.relation.holds(params.get(0), right) != self.negate
    }
}

impl HelperDef for ConditionHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        Ok(ScopedJson::Derived(Json::Bool(self.evaluate(h))))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let outcome = self.evaluate(h);
        if !h.is_block() {
            out.write(&outcome.to_string())?;
            return Ok(());
        }
        let mut block = BlockOptions::new(h, r, ctx, rc);
        out.write(&block.branch(outcome)?)?;
        Ok(())
    }
}

pub(crate) fn register(registrar: &mut Registrar) {
    for (name, relation) in [
        ("is", Relation::Equal),
        ("isnt", Relation::NotEqual),
        ("gt", Relation::Greater),
        ("gte", Relation::GreaterOrEqual),
        ("lt", Relation::Less),
        ("lte", Relation::LessOrEqual),
        ("and", Relation::And),
        ("or", Relation::Or),
    ] {
        registrar.helper(
            name,
            Box::new(ConditionHelper {
                name,
                relation,
                operand: Operand::Positional,
                negate: false,
            }),
        );
    }

    for (if_name, unless_name, relation) in [
        ("if_eq", "unless_eq", Relation::Equal),
        ("if_gt", "unless_gt", Relation::Greater),
        ("if_lt", "unless_lt", Relation::Less),
        ("if_gteq", "unless_gteq", Relation::GreaterOrEqual),
        ("if_lteq", "unless_lteq", Relation::LessOrEqual),
    ] {
        for (name, negate) in [(if_name, false), (unless_name, true)] {
            registrar.helper(
                name,
                Box::new(ConditionHelper {
                    name,
                    relation,
                    operand: Operand::CompareHash,
                    negate,
                }),
            );
        }
    }
}
