use super::{errors::ParseError, state::State, variable::Variable};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
    ops::{BitAnd, BitOr, Not},
};

/// An immutable propositional formula over named variables.
///
/// Formulas are trees built from the constants, the atoms and the connectives
/// `not`, `and`, `or` and `xor`. They are never mutated after construction
/// and may be freely shared across threads.
///
/// The concrete syntax accepted by [`Proposition::parse`] uses `-` for
/// negation, the keywords `and`, `or` and `xor` for the binary connectives
/// (in decreasing binding strength: `and`, `xor`, `or`), the keywords `true`
/// and `false` for the constants, and parentheses for grouping.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Proposition {
    /// The constant true sentence (tautology).
    True,
    /// The constant false sentence (contradiction).
    False,
    /// An atomic variable.
    Var(Variable),
    /// The negation of a sentence.
    Not(Box<Proposition>),
    /// The conjunction of two or more sentences.
    And(Vec<Proposition>),
    /// The disjunction of two or more sentences.
    Or(Vec<Proposition>),
    /// The exclusive disjunction of two sentences.
    Xor(Box<Proposition>, Box<Proposition>),
}

impl Proposition {
    /// Parses a sentence from its textual form.
    ///
    /// On malformed input, the returned [`ParseError`] names the offending
    /// token and its position.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let proposition = parser.parse_or()?;
        match parser.tokens.get(parser.pos) {
            None => Ok(proposition),
            Some((position, token)) => Err(ParseError::TrailingInput {
                token: token.text(),
                position: *position,
            }),
        }
    }

    /// Returns the set of atomic variables occurring in this sentence.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Proposition::True | Proposition::False => {}
            Proposition::Var(v) => {
                vars.insert(v.clone());
            }
            Proposition::Not(child) => child.collect_variables(vars),
            Proposition::And(children) | Proposition::Or(children) => {
                children.iter().for_each(|c| c.collect_variables(vars));
            }
            Proposition::Xor(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
        }
    }

    /// Evaluates this sentence in a state.
    ///
    /// # Panics
    ///
    /// This function panics if the state does not assign some variable of the
    /// sentence.
    pub fn eval(&self, state: &State) -> bool {
        match self {
            Proposition::True => true,
            Proposition::False => false,
            Proposition::Var(v) => state.value_of(v),
            Proposition::Not(child) => !child.eval(state),
            Proposition::And(children) => children.iter().all(|c| c.eval(state)),
            Proposition::Or(children) => children.iter().any(|c| c.eval(state)),
            Proposition::Xor(lhs, rhs) => lhs.eval(state) != rhs.eval(state),
        }
    }

    /// Returns the set of states over exactly [`Proposition::variables`] that
    /// satisfy this sentence.
    ///
    /// The computation is exact: all `2^n` candidate states are examined.
    /// The result is empty iff the sentence is unsatisfiable.
    pub fn models(&self) -> BTreeSet<State> {
        self.models_over(&self.variables())
    }

    /// Returns the satisfying states over a caller-supplied universe.
    ///
    /// # Panics
    ///
    /// This function panics if the universe does not cover all the variables
    /// of the sentence.
    pub fn models_over(&self, universe: &BTreeSet<Variable>) -> BTreeSet<State> {
        State::permutations_of(universe)
            .into_iter()
            .filter(|s| self.eval(s))
            .collect()
    }

    /// Returns `true` iff at least one state satisfies this sentence.
    pub fn is_satisfiable(&self) -> bool {
        State::permutations_of(&self.variables())
            .iter()
            .any(|s| self.eval(s))
    }

    /// Converts this sentence into its full disjunctive normal form: one
    /// disjunct per model, each a complete conjunction of literals over the
    /// variables of the sentence.
    ///
    /// An unsatisfiable sentence converts to [`Proposition::False`].
    pub fn to_full_dnf(&self) -> Proposition {
        Proposition::or_all(self.models().iter().map(State::to_proposition))
            .unwrap_or(Proposition::False)
    }

    /// Converts this sentence into a disjunctive normal form with don't-care
    /// elimination: a literal is dropped from a disjunct whenever both of its
    /// completions stay inside the model set.
    ///
    /// The result is logically equivalent to this sentence for every
    /// assignment.
    pub fn to_dnf(&self) -> Proposition {
        let vars = self.variables();
        let models = self.models_over(&vars);
        let mut cubes = BTreeSet::new();
        for model in &models {
            let mut cube: BTreeMap<Variable, bool> =
                model.iter().map(|(v, b)| (v.clone(), b)).collect();
            for var in &vars {
                if let Some(kept) = cube.remove(var) {
                    if !cube_within_models(&cube, &vars, &models) {
                        cube.insert(var.clone(), kept);
                    }
                }
            }
            cubes.insert(cube);
        }
        Proposition::or_all(cubes.into_iter().map(|cube| {
            Proposition::and_all(cube.into_iter().map(|(v, b)| literal(v, b)))
                .unwrap_or(Proposition::True)
        }))
        .unwrap_or(Proposition::False)
    }

    /// Collapses a collection of sentences into a single conjunction.
    ///
    /// A single sentence is returned unchanged; an empty collection yields
    /// `None` (the caller substitutes [`Proposition::True`] or
    /// [`Proposition::False`] as its context requires).
    pub fn and_all<I>(sentences: I) -> Option<Proposition>
    where
        I: IntoIterator<Item = Proposition>,
    {
        let mut sentences = sentences.into_iter().collect::<Vec<_>>();
        if sentences.len() <= 1 {
            sentences.pop()
        } else {
            Some(Proposition::And(sentences))
        }
    }

    /// Collapses a collection of sentences into a single disjunction.
    ///
    /// A single sentence is returned unchanged; an empty collection yields
    /// `None` (the caller substitutes [`Proposition::True`] or
    /// [`Proposition::False`] as its context requires).
    pub fn or_all<I>(sentences: I) -> Option<Proposition>
    where
        I: IntoIterator<Item = Proposition>,
    {
        let mut sentences = sentences.into_iter().collect::<Vec<_>>();
        if sentences.len() <= 1 {
            sentences.pop()
        } else {
            Some(Proposition::Or(sentences))
        }
    }

    /// Builds the exclusive disjunction of this sentence and another.
    pub fn xor(self, other: Proposition) -> Proposition {
        Proposition::Xor(Box::new(self), Box::new(other))
    }

    /// Serializes this sentence to a form that [`Proposition::parse`] parses
    /// back to a truth-table-equivalent sentence.
    pub fn to_parsable_string(&self) -> String {
        self.to_string()
    }

    // Binding strength, atoms strongest.
    fn precedence(&self) -> u8 {
        match self {
            Proposition::Or(_) => 0,
            Proposition::Xor(_, _) => 1,
            Proposition::And(_) => 2,
            _ => 3,
        }
    }

    fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, required: u8) -> fmt::Result {
        if self.precedence() < required {
            write!(f, "(")?;
            self.fmt_with_precedence(f, 0)?;
            return write!(f, ")");
        }
        match self {
            Proposition::True => write!(f, "true"),
            Proposition::False => write!(f, "false"),
            Proposition::Var(v) => write!(f, "{}", v),
            Proposition::Not(child) => {
                write!(f, "-")?;
                child.fmt_with_precedence(f, 3)
            }
            Proposition::And(children) => {
                fmt_infix_chain(f, children, "and", 3)
            }
            Proposition::Or(children) => {
                fmt_infix_chain(f, children, "or", 1)
            }
            Proposition::Xor(lhs, rhs) => {
                lhs.fmt_with_precedence(f, 2)?;
                write!(f, " xor ")?;
                rhs.fmt_with_precedence(f, 2)
            }
        }
    }
}

fn fmt_infix_chain(
    f: &mut fmt::Formatter<'_>,
    children: &[Proposition],
    connective: &str,
    child_precedence: u8,
) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", connective)?;
        }
        child.fmt_with_precedence(f, child_precedence)?;
    }
    Ok(())
}

fn literal(var: Variable, positive: bool) -> Proposition {
    let atom = Proposition::Var(var);
    if positive {
        atom
    } else {
        Proposition::Not(Box::new(atom))
    }
}

// Checks that every completion of a partial cube is a model.
fn cube_within_models(
    cube: &BTreeMap<Variable, bool>,
    vars: &BTreeSet<Variable>,
    models: &BTreeSet<State>,
) -> bool {
    let free = vars
        .iter()
        .filter(|v| !cube.contains_key(v))
        .cloned()
        .collect::<BTreeSet<_>>();
    State::permutations_of(&free).into_iter().all(|completion| {
        let mut assignment = cube.clone();
        assignment.extend(completion.iter().map(|(v, b)| (v.clone(), b)));
        models.contains(&State::new(assignment))
    })
}

impl Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_precedence(f, 0)
    }
}

impl BitAnd for Proposition {
    type Output = Proposition;

    fn bitand(self, rhs: Proposition) -> Proposition {
        Proposition::And(vec![self, rhs])
    }
}

impl BitOr for Proposition {
    type Output = Proposition;

    fn bitor(self, rhs: Proposition) -> Proposition {
        Proposition::Or(vec![self, rhs])
    }
}

impl Not for Proposition {
    type Output = Proposition;

    fn not(self) -> Proposition {
        Proposition::Not(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    LeftParen,
    RightParen,
    Minus,
    And,
    Or,
    Xor,
    True,
    False,
    Ident(String),
}

impl Token {
    fn text(&self) -> String {
        match self {
            Token::LeftParen => "(".to_string(),
            Token::RightParen => ")".to_string(),
            Token::Minus => "-".to_string(),
            Token::And => "and".to_string(),
            Token::Or => "or".to_string(),
            Token::Xor => "xor".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::Ident(name) => name.clone(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '-' => Token::Minus,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = c.to_string();
                while let Some((_, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || *next == '_' {
                        name.push(*next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match name.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "xor" => Token::Xor,
                    "true" => Token::True,
                    "false" => Token::False,
                    _ => Token::Ident(name),
                }
            }
            _ => {
                return Err(ParseError::UnexpectedCharacter {
                    character: c,
                    position,
                })
            }
        };
        tokens.push((position, token));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn eat(&mut self, expected: &Token) -> bool {
        if self
            .tokens
            .get(self.pos)
            .map(|(_, t)| t == expected)
            .unwrap_or(false)
        {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<Proposition, ParseError> {
        let mut operands = vec![self.parse_xor()?];
        while self.eat(&Token::Or) {
            operands.push(self.parse_xor()?);
        }
        if operands.len() == 1 {
            Ok(operands.pop().unwrap())
        } else {
            Ok(Proposition::Or(operands))
        }
    }

    fn parse_xor(&mut self) -> Result<Proposition, ParseError> {
        let mut result = self.parse_and()?;
        while self.eat(&Token::Xor) {
            result = result.xor(self.parse_and()?);
        }
        Ok(result)
    }

    fn parse_and(&mut self) -> Result<Proposition, ParseError> {
        let mut operands = vec![self.parse_atom()?];
        while self.eat(&Token::And) {
            operands.push(self.parse_atom()?);
        }
        if operands.len() == 1 {
            Ok(operands.pop().unwrap())
        } else {
            Ok(Proposition::And(operands))
        }
    }

    fn parse_atom(&mut self) -> Result<Proposition, ParseError> {
        let (position, token) = match self.tokens.get(self.pos) {
            Some(t) => t.clone(),
            None => return Err(ParseError::UnexpectedEnd),
        };
        self.pos += 1;
        match token {
            Token::Minus => Ok(Proposition::Not(Box::new(self.parse_atom()?))),
            Token::LeftParen => {
                let inner = self.parse_or()?;
                match self.tokens.get(self.pos) {
                    Some((_, Token::RightParen)) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some((p, t)) => Err(ParseError::UnexpectedToken {
                        token: t.text(),
                        position: *p,
                    }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Token::True => Ok(Proposition::True),
            Token::False => Ok(Proposition::False),
            Token::Ident(name) => Ok(Proposition::Var(Variable::make(&name)?)),
            other => Err(ParseError::UnexpectedToken {
                token: other.text(),
                position,
            }),
        }
    }
}
