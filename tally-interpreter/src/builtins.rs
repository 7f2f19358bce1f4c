//! Built-in constants and numeric functions available on every line.

/// How many arguments a built-in accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            Arity::Exactly(n) => n.to_string(),
            Arity::Between(min, max) => format!("{min} to {max}"),
            Arity::AtLeast(min) => format!("at least {min}"),
        }
    }
}

/// A built-in numeric function
#[derive(Debug)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub function: fn(&[f64]) -> f64,
}

impl Builtin {
    pub fn call(&self, arguments: &[f64]) -> f64 {
        (self.function)(arguments)
    }
}

macro_rules! unary {
    ($name:literal, $f:expr) => {
        Builtin {
            name: $name,
            arity: Arity::Exactly(1),
            function: |args| $f(args[0]),
        }
    };
}

static BUILTINS: &[Builtin] = &[
    unary!("abs", f64::abs),
    unary!("sqrt", f64::sqrt),
    unary!("cbrt", f64::cbrt),
    unary!("exp", f64::exp),
    unary!("ln", f64::ln),
    unary!("log10", f64::log10),
    unary!("log2", f64::log2),
    unary!("sin", f64::sin),
    unary!("cos", f64::cos),
    unary!("tan", f64::tan),
    unary!("asin", f64::asin),
    unary!("acos", f64::acos),
    unary!("atan", f64::atan),
    unary!("floor", f64::floor),
    unary!("ceil", f64::ceil),
    Builtin {
        name: "sign",
        arity: Arity::Exactly(1),
        function: |args| if args[0] == 0.0 { 0.0 } else { args[0].signum() },
    },
    Builtin {
        name: "log",
        arity: Arity::Between(1, 2),
        function: |args| match args {
            [x, base] => x.ln() / base.ln(),
            _ => args[0].ln(),
        },
    },
    Builtin {
        name: "round",
        arity: Arity::Between(1, 2),
        function: |args| match args {
            [x, digits] => {
                let factor = 10f64.powi(*digits as i32);
                (x * factor).round() / factor
            }
            _ => args[0].round(),
        },
    },
    Builtin {
        name: "pow",
        arity: Arity::Exactly(2),
        function: |args| args[0].powf(args[1]),
    },
    Builtin {
        name: "mod",
        arity: Arity::Exactly(2),
        function: |args| {
            let (a, b) = (args[0], args[1]);
            if b == 0.0 { a } else { a - b * (a / b).floor() }
        },
    },
    Builtin {
        name: "min",
        arity: Arity::AtLeast(1),
        function: |args| args.iter().copied().fold(f64::INFINITY, f64::min),
    },
    Builtin {
        name: "max",
        arity: Arity::AtLeast(1),
        function: |args| args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    },
    Builtin {
        name: "hypot",
        arity: Arity::AtLeast(1),
        function: |args| args.iter().map(|x| x * x).sum::<f64>().sqrt(),
    },
];

/// Look up a built-in function by name
pub fn lookup_function(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

/// Look up a built-in constant by name
pub fn lookup_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        "tau" => Some(std::f64::consts::TAU),
        "phi" => Some(1.618_033_988_749_895),
        _ => None,
    }
}

/// Names of every built-in function, in declaration order
pub fn function_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}
