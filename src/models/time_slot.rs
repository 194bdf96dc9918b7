/// One of the eight fixed daily sampling instants, three hours apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeSlot {
    H00,
    H03,
    H06,
    H09,
    H12,
    H15,
    H18,
    H21,
}

impl TimeSlot {
    /// All slots in daily order. Every per-day sequence iterates in this order.
    pub const ALL: [TimeSlot; 8] = [
        TimeSlot::H00,
        TimeSlot::H03,
        TimeSlot::H06,
        TimeSlot::H09,
        TimeSlot::H12,
        TimeSlot::H15,
        TimeSlot::H18,
        TimeSlot::H21,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Label as written in the reference table and the log (no leading zero).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::H00 => "0:00",
            TimeSlot::H03 => "3:00",
            TimeSlot::H06 => "6:00",
            TimeSlot::H09 => "9:00",
            TimeSlot::H12 => "12:00",
            TimeSlot::H15 => "15:00",
            TimeSlot::H18 => "18:00",
            TimeSlot::H21 => "21:00",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
