use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

/// Serialized terminal sink shared by the application and its pipelines
///
/// Every call takes the lock for exactly one unit of output and releases it
/// before returning, so it is never held across an await point.
pub struct Console {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    /// Console writing to the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Console writing to an arbitrary sink
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Writes a single line atomically
    pub fn line(&self, line: &str) -> io::Result<()> {
        let mut sink = self.lock();
        writeln!(sink, "{}", line)?;
        sink.flush()
    }

    /// Runs `write` with exclusive access to the sink
    pub fn write_with<F>(&self, write: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut sink = self.lock();
        write(&mut **sink)?;
        sink.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // A panic mid-write leaves at worst a partial line behind
        self.sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}
