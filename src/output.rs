use {
    crate::{histogram::Histogram, sentinel::Recording},
    serde::Serialize,
    std::{
        fmt::Write as _,
        io::{self, Write},
    },
};

/// one status line, as read by a status bar.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Output {
    /// the histogram, one glyph per bucket.
    pub text: String,
    /// the aggregate utilization of every cpu.
    pub percentage: u8,
    /// a per-cpu breakdown, one line per cpu.
    pub tooltip: String,
    /// set to [`Output::HIGH_LOAD`] when the system is at or above the configured threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<&'static str>,
}

// === impl Output ===

impl Output {
    pub const HIGH_LOAD: &str = "high-load";

    pub fn new(histogram: &Histogram, recording: &Recording, high_load: u8) -> Self {
        // an aggregate that couldn't be measured is reported, and compared, as 0%.
        let percentage = recording.system().unwrap_or(0);
        let class = (percentage >= high_load).then_some(Self::HIGH_LOAD);

        Self {
            text: histogram.to_string(),
            percentage,
            tooltip: Self::tooltip(recording),
            class,
        }
    }

    fn tooltip(recording: &Recording) -> String {
        fn usage(usage: Option<u8>) -> String {
            match usage {
                Some(percent) => format!("{percent}%"),
                None => "n/a".to_owned(),
            }
        }

        let mut tooltip = String::new();

        // writing into a `String` cannot fail.
        let _ = writeln!(tooltip, "CPU: {}", usage(recording.system()));
        for (id, &cpu) in recording.cpus().iter().enumerate() {
            let _ = writeln!(tooltip, "CPU{id}: {}", usage(cpu));
        }

        tooltip
    }

    /// writes this as a single line of json, and flushes the writer.
    pub fn emit(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer(&mut *out, self)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}
