#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketKind {
    Fetch,
    Mutation,
}

/// Proof that a request was issued against a list, tagged with its generation.
///
/// Tickets are consumed when they are settled, so one response can't be applied twice.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ticket has to be settled against the list that issued it"]
pub struct Ticket {
    generation: u64,
    kind: TicketKind,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> TicketKind {
        self.kind
    }
}

/// Outcome of settling a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Settled {
    Applied,
    /// A newer response had already been applied; this one was dropped.
    Stale,
}

impl Settled {
    pub fn is_applied(&self) -> bool {
        matches!(self, Settled::Applied)
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Generations {
    issued: u64,
    applied: u64,
}

impl Generations {
    pub(crate) fn issue(&mut self, kind: TicketKind) -> Ticket {
        self.issued += 1;
        Ticket {
            generation: self.issued,
            kind,
        }
    }

    /// A ticket is current while nothing issued after it has been applied.
    pub(crate) fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation > self.applied
    }

    /// Marks the ticket as applied if it is current.
    pub(crate) fn accept(&mut self, ticket: &Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.applied = ticket.generation;
        true
    }

    pub(crate) fn invalidate(&mut self) {
        self.applied = self.issued;
    }
}
