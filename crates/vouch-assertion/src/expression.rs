//! Assertion expression trees
//!
//! An expression is an AND/OR tree over atoms. The external combinator
//! writes OR as `,` and AND as `+`; rendering reproduces that grammar and
//! parenthesizes any AND factor that contains an OR, so `(a,b)+c` survives a
//! render/parse cycle.

use crate::atom::Atom;
use crate::proof::{Proof, ProofSet};
use crate::social::SocialAssertion;
use std::fmt;
use vouch_core::{AssertionError, Result};

/// Disjunction: satisfied when any term is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OrExpression {
    terms: Vec<Expression>,
}

impl OrExpression {
    /// Create a disjunction of `terms`.
    pub fn new(terms: Vec<Expression>) -> Self {
        Self { terms }
    }

    /// Terms in order.
    pub fn terms(&self) -> &[Expression] {
        &self.terms
    }

    /// Whether any term is satisfied by `proofs`.
    pub fn matches(&self, proofs: &ProofSet) -> bool {
        self.terms.iter().any(|term| term.matches(proofs))
    }

    /// Whether any term needs parentheses.
    pub fn needs_parens(&self) -> bool {
        self.terms.iter().any(Expression::needs_parens)
    }
}

impl fmt::Display for OrExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Conjunction: satisfied when every factor is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AndExpression {
    factors: Vec<Expression>,
}

impl AndExpression {
    /// Create a conjunction of `factors`.
    pub fn new(factors: Vec<Expression>) -> Self {
        Self { factors }
    }

    /// Factors in order.
    pub fn factors(&self) -> &[Expression] {
        &self.factors
    }

    /// Number of factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether there are no factors.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Append a factor.
    pub fn push(&mut self, factor: impl Into<Expression>) {
        self.factors.push(factor.into());
    }

    /// Whether every factor is satisfied by `proofs`.
    pub fn matches(&self, proofs: &ProofSet) -> bool {
        self.factors.iter().all(|factor| factor.matches(proofs))
    }

    /// Whether any factor contains an OR.
    pub fn has_or(&self) -> bool {
        self.factors.iter().any(Expression::has_or)
    }

    /// Whether `proof` on its own satisfies at least one factor.
    pub fn has_factor(&self, proof: &Proof) -> bool {
        let single = ProofSet::new([proof.clone()]);
        self.factors.iter().any(|factor| factor.matches(&single))
    }
}

impl fmt::Display for AndExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            if factor.has_or() {
                write!(f, "({factor})")?;
            } else {
                write!(f, "{factor}")?;
            }
        }
        Ok(())
    }
}

/// AND-of-ORs expression over atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Any term suffices
    Or(OrExpression),
    /// All factors required
    And(AndExpression),
    /// A single atom
    Atom(Atom),
}

impl Expression {
    /// Disjunction of `terms`.
    pub fn or(terms: impl IntoIterator<Item = impl Into<Expression>>) -> Self {
        Self::Or(OrExpression::new(terms.into_iter().map(Into::into).collect()))
    }

    /// Conjunction of `factors`.
    pub fn and(factors: impl IntoIterator<Item = impl Into<Expression>>) -> Self {
        Self::And(AndExpression::new(
            factors.into_iter().map(Into::into).collect(),
        ))
    }

    /// Whether `proofs` satisfy this expression.
    pub fn matches(&self, proofs: &ProofSet) -> bool {
        match self {
            Self::Or(or) => or.matches(proofs),
            Self::And(and) => and.matches(proofs),
            Self::Atom(atom) => atom.matches(proofs),
        }
    }

    /// Whether this expression contains an OR.
    pub fn has_or(&self) -> bool {
        match self {
            Self::Or(_) => true,
            Self::And(and) => and.has_or(),
            Self::Atom(_) => false,
        }
    }

    /// Whether this expression must be parenthesized when nested.
    pub fn needs_parens(&self) -> bool {
        match self {
            Self::Or(or) => or.needs_parens(),
            Self::And(and) => and.has_or(),
            Self::Atom(_) => false,
        }
    }

    /// All atoms, depth-first, left to right.
    pub fn collect_atoms(&self) -> Vec<&Atom> {
        let mut atoms = Vec::new();
        self.collect_atoms_into(&mut atoms);
        atoms
    }

    /// Append all atoms, depth-first, left to right, to `acc`.
    pub fn collect_atoms_into<'a>(&'a self, acc: &mut Vec<&'a Atom>) {
        match self {
            Self::Or(or) => {
                for term in &or.terms {
                    term.collect_atoms_into(acc);
                }
            }
            Self::And(and) => {
                for factor in &and.factors {
                    factor.collect_atoms_into(acc);
                }
            }
            Self::Atom(atom) => acc.push(atom),
        }
    }

    /// View a single-atom expression as a social assertion.
    pub fn to_social_assertion(&self) -> Result<SocialAssertion> {
        match self {
            Self::Or(_) => Err(AssertionError::not_convertible("OR expression")),
            Self::And(_) => Err(AssertionError::not_convertible("AND expression")),
            Self::Atom(atom) => atom.to_social_assertion(),
        }
    }

    /// The atom, if this expression is a single atom.
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }
}

impl From<Atom> for Expression {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<OrExpression> for Expression {
    fn from(or: OrExpression) -> Self {
        Self::Or(or)
    }
}

impl From<AndExpression> for Expression {
    fn from(and: AndExpression) -> Self {
        Self::And(and)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Or(or) => fmt::Display::fmt(or, f),
            Self::And(and) => fmt::Display::fmt(and, f),
            Self::Atom(atom) => fmt::Display::fmt(atom, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_atom;
    use vouch_core::SocialServiceRegistry;

    fn atom(token: &str) -> Expression {
        parse_atom(&SocialServiceRegistry::default(), token, false)
            .unwrap()
            .into()
    }

    fn proofs(list: &[(&str, &str)]) -> ProofSet {
        list.iter().map(|(k, v)| Proof::new(*k, *v)).collect()
    }

    #[test]
    fn test_render_or_and() {
        let or = Expression::or([atom("alice"), atom("bob")]);
        assert_eq!(or.to_string(), "alice,bob");

        let and = Expression::and([or.clone(), atom("carol")]);
        assert_eq!(and.to_string(), "(alice,bob)+carol");

        let plain = Expression::and([atom("alice"), atom("bob@twitter")]);
        assert_eq!(plain.to_string(), "alice+bob@twitter");
    }

    #[test]
    fn test_render_parenthesizes_nested_and_with_or() {
        let inner = Expression::and([atom("alice"), Expression::or([atom("bob"), atom("carol")])]);
        let outer = Expression::and([inner, atom("dave")]);
        assert_eq!(outer.to_string(), "(alice+(bob,carol))+dave");
    }

    #[test]
    fn test_has_or_and_needs_parens() {
        let or = Expression::or([atom("alice"), atom("bob")]);
        assert!(or.has_or());
        assert!(!or.needs_parens());

        let and = Expression::and([atom("alice"), or.clone()]);
        assert!(and.has_or());
        assert!(and.needs_parens());

        let or_of_and = Expression::or([and, atom("carol")]);
        assert!(or_of_and.needs_parens());

        assert!(!atom("alice").has_or());
        assert!(!Expression::and([atom("alice"), atom("bob")]).has_or());
    }

    #[test]
    fn test_matching() {
        let expr = Expression::and([
            Expression::or([atom("alice@twitter"), atom("alice@github")]),
            atom("dns:example.com"),
        ]);

        assert!(expr.matches(&proofs(&[("github", "alice"), ("dns", "example.com")])));
        assert!(!expr.matches(&proofs(&[("github", "alice")])));
        assert!(!expr.matches(&proofs(&[("dns", "example.com")])));
        assert!(!expr.matches(&ProofSet::default()));
    }

    #[test]
    fn test_empty_groups() {
        assert!(Expression::and(Vec::<Expression>::new()).matches(&ProofSet::default()));
        assert!(!Expression::or(Vec::<Expression>::new()).matches(&ProofSet::default()));
    }

    #[test]
    fn test_collect_atoms_preorder() {
        let expr = Expression::and([
            Expression::or([atom("a1"), Expression::and([atom("b1"), atom("b2")])]),
            atom("c1"),
        ]);
        let names: Vec<String> = expr.collect_atoms().iter().map(|a| a.to_string()).collect();
        assert_eq!(names, ["a1", "b1", "b2", "c1"]);
    }

    #[test]
    fn test_has_factor() {
        let and = AndExpression::new(vec![
            atom("alice@twitter"),
            Expression::or([atom("bob@github"), atom("web:example.com")]),
        ]);
        assert!(and.has_factor(&Proof::new("twitter", "alice")));
        assert!(and.has_factor(&Proof::new("https", "example.com")));
        assert!(!and.has_factor(&Proof::new("github", "alice")));
        assert_eq!(and.len(), 2);
    }

    #[test]
    fn test_to_social_assertion() {
        assert!(atom("bob@github").to_social_assertion().is_ok());
        assert!(matches!(
            Expression::or([atom("a1")]).to_social_assertion(),
            Err(AssertionError::NotConvertible { .. })
        ));
        assert!(matches!(
            Expression::and([atom("a1")]).to_social_assertion(),
            Err(AssertionError::NotConvertible { .. })
        ));
    }
}
