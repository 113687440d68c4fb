//! Kernel Loop Tests
//!
//! Boot, polling and key handling through the public `Kernel` surface.

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;

    use crate::config::KernelConfig;
    use crate::console::LineBuffer;
    use crate::drivers::keyboard::ScancodeSource;
    use crate::drivers::rtc::FixedClock;
    use crate::drivers::vga::Screen;
    use crate::error::ConfigError;
    use crate::terminal::PowerAction;
    use crate::Kernel;

    /// Scancodes queued up front, as a keyboard controller would hand them out.
    struct Typed(VecDeque<u8>);

    impl Typed {
        /// Press and release each key of `text`; `\n` is Enter.
        fn new(text: &str) -> Self {
            let mut codes = VecDeque::new();
            for c in text.chars() {
                let make = match c {
                    'a' => 0x1E,
                    'd' => 0x20,
                    'h' => 0x23,
                    'n' => 0x31,
                    'o' => 0x18,
                    'p' => 0x19,
                    'r' => 0x13,
                    's' => 0x1F,
                    't' => 0x14,
                    'u' => 0x16,
                    'w' => 0x11,
                    ' ' => 0x39,
                    '\n' => 0x1C,
                    other => panic!("no scancode for {:?}", other),
                };
                codes.push_back(make);
                codes.push_back(make | 0x80);
            }
            Typed(codes)
        }
    }

    impl ScancodeSource for Typed {
        fn poll(&mut self) -> Option<u8> {
            self.0.pop_front()
        }
    }

    fn kernel(config: KernelConfig) -> Kernel {
        Kernel::new(config, Box::new(FixedClock::default())).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = KernelConfig {
            max_processes: 0,
            ..KernelConfig::default()
        };
        let err = Kernel::new(config, Box::new(FixedClock::default())).err();
        assert_eq!(err, Some(ConfigError::ZeroSize { field: "max_processes" }));
    }

    #[test]
    fn test_boot_prints_banner() {
        let mut k = kernel(KernelConfig::default());
        let mut screen = Screen::new();
        k.boot(&mut screen);
        assert_eq!(screen.row_text(0), "Welcome to AGRAN OS v0.1");
        assert_eq!(screen.row_text(1), "Type 'help' for a list of commands");
        assert_eq!(screen.row_text(3), "$");
        assert_eq!(screen.cursor(), (2, 3));
    }

    #[test]
    fn test_run_until_shutdown() {
        let mut k = kernel(KernelConfig::default());
        let mut out = LineBuffer::new();
        let mut keys = Typed::new("run a\nps\nshutdown\n");
        k.boot(&mut out);

        assert_eq!(k.run(&mut keys, &mut out), PowerAction::Shutdown);
        assert_eq!(k.scheduler().count_active(), 1);
        assert!(out.contains("Created process 'a' with PID 0"));
        assert!(out.contains("PID: 0 Name: a State: RUNNING Time Remaining: 5"));
        assert!(out.contains("Shutting down AGRAN OS..."));
        assert_eq!(k.shell().history().len(), 3);
    }

    #[test]
    fn test_poll_consumes_one_scancode() {
        let mut k = kernel(KernelConfig::default());
        let mut out = LineBuffer::new();
        let mut keys = Typed::new("p");
        assert_eq!(k.poll(&mut keys, &mut out), None);
        assert_eq!(out.pending(), "p");
        // Release code, then nothing.
        assert_eq!(k.poll(&mut keys, &mut out), None);
        assert_eq!(k.poll(&mut keys, &mut out), None);
        assert_eq!(k.shell().buffer(), "p");
    }

    #[test]
    fn test_idle_polls_drive_the_scheduler() {
        let config = KernelConfig {
            tick_on_idle_poll: true,
            ..KernelConfig::default()
        };
        let mut k = kernel(config);
        let mut out = LineBuffer::new();
        k.submit_line("run job 2", &mut out);

        let mut idle = Typed(VecDeque::new());
        for _ in 0..3 {
            k.poll(&mut idle, &mut out);
        }
        assert_eq!(k.scheduler().count_active(), 0);
        assert!(out.contains("Process terminated: job"));
    }

    #[test]
    fn test_idle_polls_do_not_tick_by_default() {
        let mut k = kernel(KernelConfig::default());
        let mut out = LineBuffer::new();
        k.submit_line("run job 2", &mut out);
        let ticks = k.scheduler().ticks();

        let mut idle = Typed(VecDeque::new());
        for _ in 0..10 {
            k.poll(&mut idle, &mut out);
        }
        assert_eq!(k.scheduler().ticks(), ticks);
    }

    #[test]
    fn test_font_changes_screen_colour() {
        let mut k = kernel(KernelConfig::default());
        let mut screen = Screen::new();
        k.submit_line("font green", &mut screen);
        assert_eq!(screen.color().raw(), 0x02);
        let rows: Vec<_> = (0..2).map(|r| screen.row_text(r)).collect();
        assert_eq!(rows, ["font green", "Text color changed."]);
    }

    #[test]
    fn test_clear_blanks_screen() {
        let mut k = kernel(KernelConfig::default());
        let mut screen = Screen::new();
        k.boot(&mut screen);
        k.submit_line("clear", &mut screen);
        assert_eq!(screen.dump(), "$");
    }
}
