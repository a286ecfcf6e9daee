use anyhow::{bail, Result};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    RuntimeError,
    TimeLimitExceeded,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::Accepted,
        Verdict::WrongAnswer,
        Verdict::RuntimeError,
        Verdict::TimeLimitExceeded,
    ];

    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }

    /// The spelling used on the command stream and in reports.
    pub fn wire_name(self) -> &'static str {
        match self {
            Verdict::Accepted => "Accepted",
            Verdict::WrongAnswer => "Wrong_Answer",
            Verdict::RuntimeError => "Runtime_Error",
            Verdict::TimeLimitExceeded => "Time_Limit_Exceed",
        }
    }
}

impl FromStr for Verdict {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Verdict::ALL.into_iter().find(|verdict| verdict.wire_name() == s) {
            Some(verdict) => Ok(verdict),
            None => bail!(
                "Unknown verdict {s:?}. The supported verdicts are 'Accepted', 'Wrong_Answer', \
                 'Runtime_Error', and 'Time_Limit_Exceed'."
            ),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("Accepted".parse::<Verdict>().unwrap(), Verdict::Accepted);
        assert_eq!(
            "Time_Limit_Exceed".parse::<Verdict>().unwrap(),
            Verdict::TimeLimitExceeded
        );
        assert_eq!(Verdict::RuntimeError.to_string(), "Runtime_Error");
    }

    #[test]
    fn rejects_unknown_verdict() {
        assert!("WrongAnswer".parse::<Verdict>().is_err());
        assert!("ALL".parse::<Verdict>().is_err());
    }
}
