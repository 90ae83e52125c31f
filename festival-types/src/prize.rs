/// The prizes raffled off at the festival booth.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prize {
    Airpods,
    TransformingRobot,
    Dagger,
}

impl Prize {
    pub const ALL: [Prize; 3] = [Prize::Airpods, Prize::TransformingRobot, Prize::Dagger];

    /// The value sent as the `prize` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Prize::Airpods => "A",
            Prize::TransformingRobot => "B",
            Prize::Dagger => "C",
        }
    }

    /// The name shown on the event admin page.
    pub fn display_name(&self) -> &'static str {
        match self {
            Prize::Airpods => "에어팟",
            Prize::TransformingRobot => "변신로봇",
            Prize::Dagger => "단검",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Prize> {
        Prize::ALL
            .into_iter()
            .find(|prize| prize.display_name() == name)
    }

    pub fn from_code(code: &str) -> Option<Prize> {
        Prize::ALL.into_iter().find(|prize| prize.code() == code)
    }
}

impl std::fmt::Display for Prize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Query code for a prize display name. Names outside the table send an empty code.
pub fn prize_param(name: &str) -> &'static str {
    Prize::from_display_name(name)
        .map(|prize| prize.code())
        .unwrap_or("")
}
