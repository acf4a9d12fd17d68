//! Test utilities shared by unit tests and integration tests.
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

pub mod clock {
    //! Controllable clock for token expiry tests.

    use std::sync::{Mutex, MutexGuard};

    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use mockable::Clock;

    /// Clock that only moves when told to.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::test_support::clock::MutableClock;
    /// use chrono::Duration;
    /// use mockable::Clock;
    ///
    /// let clock = MutableClock::at_epoch_offset(1_700_000_000);
    /// let before = clock.utc();
    /// clock.advance(Duration::minutes(31));
    /// assert_eq!(clock.utc() - before, Duration::minutes(31));
    /// ```
    #[derive(Debug)]
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        /// Clock frozen at `now`.
        #[must_use]
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Clock frozen `seconds` after the Unix epoch.
        ///
        /// # Panics
        /// Panics when `seconds` is outside chrono's representable range.
        #[must_use]
        pub fn at_epoch_offset(seconds: i64) -> Self {
            match Utc.timestamp_opt(seconds, 0).single() {
                Some(now) => Self::new(now),
                None => panic!("timestamp {seconds} is not representable"),
            }
        }

        /// Move the clock forward by `delta`.
        pub fn advance(&self, delta: Duration) {
            *self.lock_clock() += delta;
        }

        /// Move the clock forward by whole seconds.
        pub fn advance_seconds(&self, seconds: i64) {
            self.advance(Duration::seconds(seconds));
        }

        /// Pin the clock to `now`.
        pub fn set(&self, now: DateTime<Utc>) {
            *self.lock_clock() = now;
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(error) => panic!("mutable clock mutex poisoned: {error}"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod csv_fixture {
    //! Temporary CSV files in the scraper's output format.
    //!
    //! Writes go through `cap_std` like every other filesystem access in the
    //! crate.

    use std::io;
    use std::path::{Path, PathBuf};

    use cap_std::{ambient_authority, fs::Dir};
    use tempfile::TempDir;

    /// Header row emitted by the scraper.
    pub const HEADER: &str = "titulo,preco,rating,disponibilidade,categoria,imagem_url";

    /// A data file inside a private temporary directory.
    ///
    /// The directory and file are removed on drop.
    #[derive(Debug)]
    pub struct CsvFixture {
        dir: TempDir,
        file_name: &'static str,
    }

    impl CsvFixture {
        /// Write `rows` beneath the standard header.
        pub fn with_rows(rows: &[&str]) -> io::Result<Self> {
            let mut contents = String::from(HEADER);
            for row in rows {
                contents.push('\n');
                contents.push_str(row);
            }
            contents.push('\n');
            Self::with_contents(&contents)
        }

        /// Write raw `contents`, header included.
        pub fn with_contents(contents: &str) -> io::Result<Self> {
            let fixture = Self::empty_dir()?;
            let dir = Dir::open_ambient_dir(fixture.dir.path(), ambient_authority())?;
            dir.write(fixture.file_name, contents.as_bytes())?;
            Ok(fixture)
        }

        /// Temporary directory without a data file, for missing-source tests.
        pub fn empty_dir() -> io::Result<Self> {
            Ok(Self {
                dir: tempfile::tempdir()?,
                file_name: "books_data.csv",
            })
        }

        /// Path of the data file, whether or not it exists.
        #[must_use]
        pub fn path(&self) -> PathBuf {
            self.dir.path().join(self.file_name)
        }

        /// Directory holding the data file.
        #[must_use]
        pub fn dir(&self) -> &Path {
            self.dir.path()
        }
    }

    /// A few well-formed rows spanning two categories and several ratings.
    pub const SAMPLE_ROWS: &[&str] = &[
        "A Light in the Attic,51.77,3,In stock,Poetry,https://example.test/1.jpg",
        "Tipping the Velvet,53.74,1,In stock,Historical Fiction,https://example.test/2.jpg",
        "Soumission,50.10,1,In stock,Fiction,https://example.test/3.jpg",
        "Sharp Objects,47.82,4,In stock,Mystery,https://example.test/4.jpg",
        "\"Sapiens: A Brief History of Humankind\",54.23,5,In stock,History,https://example.test/5.jpg",
        "The Requiem Red,22.65,1,Out of stock,Young Adult,https://example.test/6.jpg",
    ];
}
