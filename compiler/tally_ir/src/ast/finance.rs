//! Finance call forms recognized by the parser.

/// Built-in finance functions that get dedicated AST nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FinanceFn {
    Npv,
    Irr,
    Pv,
    Fv,
    Wacc,
    Capm,
    Var,
    Sma,
    Ema,
    Amortize,
}

impl FinanceFn {
    pub const ALL: [FinanceFn; 10] = [
        FinanceFn::Npv,
        FinanceFn::Irr,
        FinanceFn::Pv,
        FinanceFn::Fv,
        FinanceFn::Wacc,
        FinanceFn::Capm,
        FinanceFn::Var,
        FinanceFn::Sma,
        FinanceFn::Ema,
        FinanceFn::Amortize,
    ];

    /// Case-insensitive lookup of a callee name.
    pub fn from_name(name: &str) -> Option<FinanceFn> {
        FinanceFn::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub const fn name(self) -> &'static str {
        match self {
            FinanceFn::Npv => "NPV",
            FinanceFn::Irr => "IRR",
            FinanceFn::Pv => "PV",
            FinanceFn::Fv => "FV",
            FinanceFn::Wacc => "WACC",
            FinanceFn::Capm => "CAPM",
            FinanceFn::Var => "VAR",
            FinanceFn::Sma => "SMA",
            FinanceFn::Ema => "EMA",
            FinanceFn::Amortize => "AMORTIZE",
        }
    }

    /// Accepted argument counts, inclusive.
    pub const fn arity(self) -> (usize, usize) {
        match self {
            FinanceFn::Irr => (1, 1),
            FinanceFn::Npv | FinanceFn::Var | FinanceFn::Sma | FinanceFn::Ema => (2, 2),
            FinanceFn::Pv | FinanceFn::Fv => (2, 4),
            FinanceFn::Capm | FinanceFn::Amortize => (3, 3),
            FinanceFn::Wacc => (5, 5),
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        let (min, max) = self.arity();
        (min..=max).contains(&count)
    }
}

/// Which side of the ledger an entry lands on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LedgerSide {
    Debit,
    Credit,
}

/// Target of a scope-qualified identifier (`global::x`, `parent::x`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeQualifier {
    Global,
    Parent,
}

impl ScopeQualifier {
    pub fn from_name(name: &str) -> Option<ScopeQualifier> {
        if name.eq_ignore_ascii_case("global") {
            Some(ScopeQualifier::Global)
        } else if name.eq_ignore_ascii_case("parent") {
            Some(ScopeQualifier::Parent)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ScopeQualifier::Global => "global",
            ScopeQualifier::Parent => "parent",
        }
    }
}
