//! Translation engine
//!
//! Orchestrates a `get`: standardized path → rule → first evaluable
//! alternative expression → value. Variables inside an expression
//! resolve to a leaf raw value (through the injected resolver, subject
//! to the vendor filter) or to another rule's result, recursively.
//! All shared state is immutable after construction.

use crate::config::{LeafPath, Mappings, Rule, Rules, VendorOids};
use crate::evaluator::{self, Context};
use crate::model::Value;
use crate::parser::parse_expression;
use crate::registry::FunctionRegistry;
use crate::resolver::{LeafResolver, SampleResolver};
use crate::tree::{PathError, PathTree};
use crate::vendor::VendorFilter;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

/// Default bound on rule recursion depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Errors surfaced to the caller of [`TranslationEngine`]
#[derive(Error, Debug)]
pub enum EngineError {
    /// More than one rule was bound to the same name
    #[error("more than one rule bound to identifier `{name}`")]
    DuplicateRule {
        /// The repeated rule name
        name: String,
    },

    /// A tree node was bound to a rule that does not exist
    #[error("path `{path}` is bound to rule `{rule}`, which is not defined")]
    UnresolvedBinding {
        /// The bound path
        path: String,
        /// The missing rule name
        rule: String,
    },

    /// The requested path has no rule binding
    #[error("failed to identify a rule for path `{path}`: {source}")]
    PathNotFound {
        /// The requested path, as given
        path: String,
        /// Why the lookup failed
        source: PathError,
    },

    /// The path tree named a rule that is not in the registry
    #[error("could not locate rule `{rule}` for path `{path}`")]
    UnknownRule {
        /// The missing rule name
        rule: String,
        /// The requested path
        path: String,
    },

    /// Every alternative expression of the rule failed
    #[error("none of the expressions of rule `{rule}` could be evaluated (see logs for details)")]
    NoAlternative {
        /// The rule whose alternatives were exhausted
        rule: String,
    },

    /// Rule references nested deeper than the configured bound
    #[error("rule recursion limit ({limit}) exceeded while evaluating rule `{rule}`")]
    RecursionLimit {
        /// The rule that crossed the bound
        rule: String,
        /// The configured bound
        limit: usize,
    },

    /// A path in the mappings document was malformed
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Why one variable of an alternative could not be resolved.
enum VariableFailure {
    /// The vendor filter rejected a leaf: informational, not an error
    Inadmissible { leaf: String },
    /// Anything else that abandons the alternative
    Skip { message: String },
    /// Must surface to the caller instead of trying other alternatives
    Fatal(EngineError),
}

/// Translates standardized paths into values for vendor targets
pub struct TranslationEngine {
    tree: PathTree,
    rules: FxHashMap<String, Rule>,
    vendors: VendorFilter,
    functions: FunctionRegistry,
    resolver: Box<dyn LeafResolver>,
    max_depth: usize,
}

impl TranslationEngine {
    /// Build an engine from deserialized configuration documents.
    ///
    /// The default leaf resolver answers from declared samples; swap in
    /// a network client with [`with_resolver`](Self::with_resolver).
    pub fn new(
        mappings: &Mappings,
        rules: Rules,
        vendor_oids: VendorOids,
    ) -> Result<Self, EngineError> {
        let tree = PathTree::from_mappings(mappings)?;
        let mut rule_map = FxHashMap::default();
        for rule in rules.rules {
            let name = rule.bind.clone();
            if rule_map.insert(name.clone(), rule).is_some() {
                return Err(EngineError::DuplicateRule { name });
            }
        }
        for (path, rule) in tree.bindings() {
            if !rule_map.contains_key(rule) {
                return Err(EngineError::UnresolvedBinding {
                    path: path.to_string(),
                    rule: rule.to_string(),
                });
            }
        }
        Ok(Self {
            tree,
            rules: rule_map,
            vendors: VendorFilter::new(vendor_oids),
            functions: FunctionRegistry::standard(),
            resolver: Box::new(SampleResolver),
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Build an engine from the three JSON configuration files.
    pub fn from_files(
        mappings: impl AsRef<Path>,
        rules: impl AsRef<Path>,
        vendor_oids: impl AsRef<Path>,
    ) -> Result<Self, crate::error::TranslateError> {
        let mappings = crate::config::load_mappings(mappings)?;
        let rules = crate::config::load_rules(rules)?;
        let vendor_oids = crate::config::load_vendor_oids(vendor_oids)?;
        Ok(Self::new(&mappings, rules, vendor_oids)?)
    }

    /// Replace the leaf resolver.
    pub fn with_resolver(mut self, resolver: Box<dyn LeafResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the recursion depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Retrieve the current value of a standardized path for a target
    /// of the given vendor.
    pub fn evaluate(&self, path: &str, target: &str, vendor: &str) -> Result<Value, EngineError> {
        let rule_name = self
            .tree
            .rule_of(path)
            .map_err(|source| EngineError::PathNotFound {
                path: path.to_string(),
                source,
            })?;
        let rule = self
            .rules
            .get(rule_name)
            .ok_or_else(|| EngineError::UnknownRule {
                rule: rule_name.to_string(),
                path: path.to_string(),
            })?;
        info!(rule = %rule_name, %path, "found rule for path");
        self.eval_rule(rule, target, vendor, 0)
    }

    /// Render the subtree of the path namespace rooted at the given
    /// path.
    pub fn render_paths(&self, root: &str) -> Result<String, EngineError> {
        Ok(self.tree.render(root)?)
    }

    /// Evaluate a rule by trying each alternative expression in
    /// declaration order and returning the first that works.
    fn eval_rule(
        &self,
        rule: &Rule,
        target: &str,
        vendor: &str,
        depth: usize,
    ) -> Result<Value, EngineError> {
        if depth >= self.max_depth {
            return Err(EngineError::RecursionLimit {
                rule: rule.bind.clone(),
                limit: self.max_depth,
            });
        }
        info!(rule = %rule.bind, %target, %vendor, "evaluating rule");
        let leaves = self.named_leaves(rule);

        for expression_string in &rule.expressions {
            info!("evaluating expression `{expression_string}`");
            let expression = match parse_expression(expression_string) {
                Ok(expression) => expression,
                Err(err) => {
                    error!("could not parse expression `{expression_string}`: {err}");
                    continue;
                }
            };

            let (variables, function_names) = expression.identifiers();
            if let Some(missing) = function_names
                .iter()
                .find(|name| !self.functions.contains(name))
            {
                error!("function `{missing}` is not defined");
                continue;
            }

            let context = match self.eval_variables(&variables, &leaves, target, vendor, depth) {
                Ok(context) => context,
                Err(VariableFailure::Inadmissible { leaf }) => {
                    // Not an error to surface: the leaf is simply not
                    // available for this vendor.
                    info!("ignoring leaf `{leaf}` as it cannot be resolved for vendor `{vendor}`");
                    info!(
                        "could not evaluate all variables for expression \
                         `{expression_string}`, continuing to next expression"
                    );
                    continue;
                }
                Err(VariableFailure::Skip { message }) => {
                    error!("{message}");
                    info!(
                        "could not evaluate all variables for expression \
                         `{expression_string}`, continuing to next expression"
                    );
                    continue;
                }
                Err(VariableFailure::Fatal(err)) => return Err(err),
            };

            match evaluator::evaluate(&expression, &context, &self.functions) {
                Ok(value) => {
                    info!("evaluated expression: {expression} = {value}");
                    return Ok(value);
                }
                Err(err) => {
                    error!("could not evaluate expression `{expression}`: {err}");
                    continue;
                }
            }
        }

        Err(EngineError::NoAlternative {
            rule: rule.bind.clone(),
        })
    }

    /// Index the rule's leaf descriptors by local name, skipping any
    /// descriptor without one.
    fn named_leaves<'a>(&self, rule: &'a Rule) -> FxHashMap<&'a str, &'a LeafPath> {
        let mut leaves = FxHashMap::default();
        for leaf in &rule.leaves {
            if leaf.bind.is_empty() {
                warn!(rule = %rule.bind, "rule contains a leaf descriptor without an identifier");
            } else {
                leaves.insert(leaf.bind.as_str(), leaf);
            }
        }
        leaves
    }

    /// Resolve each variable exactly once, in the order they appear in
    /// the expression. A local leaf name shadows a rule of the same
    /// name.
    fn eval_variables(
        &self,
        variables: &[String],
        leaves: &FxHashMap<&str, &LeafPath>,
        target: &str,
        vendor: &str,
        depth: usize,
    ) -> Result<Context, VariableFailure> {
        let mut context = Context::default();
        for variable in variables {
            if context.contains_key(variable) {
                continue;
            }
            info!("evaluating variable `{variable}`");

            let value = if let Some(leaf) = leaves.get(variable.as_str()).copied() {
                self.resolve_leaf(leaf, variable, target, vendor)?
            } else if let Some(sub_rule) = self.rules.get(variable) {
                match self.eval_rule(sub_rule, target, vendor, depth + 1) {
                    Ok(value) => value,
                    Err(err @ EngineError::RecursionLimit { .. }) => {
                        return Err(VariableFailure::Fatal(err));
                    }
                    Err(err) => {
                        return Err(VariableFailure::Skip {
                            message: format!("could not evaluate sub-rule `{variable}`: {err}"),
                        });
                    }
                }
            } else {
                return Err(VariableFailure::Skip {
                    message: format!("leaf or sub-rule `{variable}` is undefined"),
                });
            };

            info!("evaluated variable `{variable}` = {value}");
            context.insert(variable.clone(), value);
        }
        Ok(context)
    }

    /// Fetch a leaf's raw value, applying the vendor filter first.
    fn resolve_leaf(
        &self,
        leaf: &LeafPath,
        variable: &str,
        target: &str,
        vendor: &str,
    ) -> Result<Value, VariableFailure> {
        if !self.vendors.admits(leaf, vendor) {
            return Err(VariableFailure::Inadmissible {
                leaf: variable.to_string(),
            });
        }
        self.resolver
            .resolve(leaf, target)
            .map_err(|err| VariableFailure::Skip {
                message: format!(
                    "failed to resolve leaf `{variable}` for target `{target}` \
                     (this leaf should normally be resolvable for this target): {err}"
                ),
            })
    }
}
