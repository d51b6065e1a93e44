// Timer readiness on the platform queue: timerfd + epoll on Linux, EVFILT_TIMER on macOS
use crate::common::constants::MAX_POLL_EVENTS;
use crate::common::error::{CountdownError, Result};
use std::io;
use std::os::unix::io::RawFd;
use std::time::Duration;

#[cfg(target_os = "macos")]
use libc::{c_int, kevent, kqueue, EVFILT_TIMER, EV_ADD, EV_DELETE, EV_ENABLE};

#[cfg(target_os = "linux")]
use libc::{
    c_int, epoll_create1, epoll_ctl, epoll_event, epoll_wait, itimerspec, timerfd_create,
    timerfd_settime, timespec, CLOCK_MONOTONIC, EPOLLIN, EPOLL_CLOEXEC, EPOLL_CTL_ADD,
    EPOLL_CTL_DEL, TFD_CLOEXEC, TFD_NONBLOCK,
};
#[cfg(target_os = "linux")]
use std::collections::HashMap;

pub struct Poller {
    #[cfg(target_os = "macos")]
    kq: RawFd,

    #[cfg(target_os = "linux")]
    epfd: RawFd,

    // timer id -> timerfd
    #[cfg(target_os = "linux")]
    timer_fds: HashMap<u64, RawFd>,
}

impl Poller {
    pub fn new() -> Result<Self> {
        unsafe {
            #[cfg(target_os = "macos")]
            {
                let kq = kqueue();
                if kq < 0 {
                    return Err(CountdownError::SchedulerError(format!(
                        "Failed to create kqueue: {}",
                        io::Error::last_os_error()
                    )));
                }
                Ok(Self { kq })
            }

            #[cfg(target_os = "linux")]
            {
                let epfd = epoll_create1(EPOLL_CLOEXEC);
                if epfd < 0 {
                    return Err(CountdownError::SchedulerError(format!(
                        "Failed to create epoll instance: {}",
                        io::Error::last_os_error()
                    )));
                }
                Ok(Self {
                    epfd,
                    timer_fds: HashMap::new(),
                })
            }

            #[cfg(not(any(target_os = "macos", target_os = "linux")))]
            {
                Err(CountdownError::SchedulerError(
                    "Unsupported platform".to_string(),
                ))
            }
        }
    }

    /// Arm a periodic timer that becomes readable every `interval`. `id` is
    /// reported by [`Poller::wait`] each time it fires.
    pub fn add_timer(&mut self, id: u64, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(CountdownError::SchedulerError(
                "Timer interval must be greater than 0".to_string(),
            ));
        }

        #[cfg(target_os = "macos")]
        {
            // EVFILT_TIMER counts in milliseconds by default
            let millis = interval.as_millis().clamp(1, isize::MAX as u128) as isize;
            let kev = libc::kevent {
                ident: id as usize,
                filter: EVFILT_TIMER,
                flags: EV_ADD | EV_ENABLE,
                fflags: 0,
                data: millis,
                udata: std::ptr::null_mut(),
            };
            self.change(&kev, "register timer")
        }

        #[cfg(target_os = "linux")]
        {
            unsafe {
                let fd = timerfd_create(CLOCK_MONOTONIC, TFD_CLOEXEC | TFD_NONBLOCK);
                if fd < 0 {
                    return Err(CountdownError::SchedulerError(format!(
                        "Failed to create timerfd: {}",
                        io::Error::last_os_error()
                    )));
                }

                let period = timespec {
                    tv_sec: interval.as_secs() as libc::time_t,
                    tv_nsec: interval.subsec_nanos() as libc::c_long,
                };
                let spec = itimerspec {
                    it_interval: period,
                    it_value: period,
                };
                if timerfd_settime(fd, 0, &spec, std::ptr::null_mut()) < 0 {
                    let err = io::Error::last_os_error();
                    libc::close(fd);
                    return Err(CountdownError::SchedulerError(format!(
                        "Failed to arm timerfd: {}",
                        err
                    )));
                }

                let mut ev: epoll_event = std::mem::zeroed();
                ev.events = EPOLLIN as u32;
                ev.u64 = id;
                if epoll_ctl(self.epfd, EPOLL_CTL_ADD, fd, &mut ev) < 0 {
                    let err = io::Error::last_os_error();
                    libc::close(fd);
                    return Err(CountdownError::SchedulerError(format!(
                        "Failed to register timer {}: {}",
                        id, err
                    )));
                }

                if let Some(old) = self.timer_fds.insert(id, fd) {
                    Self::close_timer_fd(self.epfd, old);
                }
            }
            Ok(())
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = id;
            Err(CountdownError::SchedulerError(
                "Unsupported platform".to_string(),
            ))
        }
    }

    /// Disarm a timer. Unknown ids are ignored.
    pub fn remove_timer(&mut self, id: u64) -> Result<()> {
        #[cfg(target_os = "macos")]
        {
            let kev = libc::kevent {
                ident: id as usize,
                filter: EVFILT_TIMER,
                flags: EV_DELETE,
                fflags: 0,
                data: 0,
                udata: std::ptr::null_mut(),
            };
            // ENOENT for an unknown id is fine
            let _ = self.change(&kev, "remove timer");
            Ok(())
        }

        #[cfg(target_os = "linux")]
        {
            if let Some(fd) = self.timer_fds.remove(&id) {
                Self::close_timer_fd(self.epfd, fd);
            }
            Ok(())
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = id;
            Ok(())
        }
    }

    /// Block until at least one timer fires or `timeout_ms` passes (negative
    /// waits forever). Ids of fired timers are appended to `fired`; the return
    /// value is their count, 0 on timeout or when a signal interrupted the wait.
    pub fn wait(&mut self, fired: &mut Vec<u64>, timeout_ms: i32) -> Result<usize> {
        #[cfg(target_os = "macos")]
        {
            unsafe {
                let timeout = libc::timespec {
                    tv_sec: (timeout_ms.max(0) / 1000) as libc::time_t,
                    tv_nsec: ((timeout_ms.max(0) % 1000) * 1_000_000) as libc::c_long,
                };
                let timeout_ptr = if timeout_ms >= 0 {
                    &timeout as *const libc::timespec
                } else {
                    std::ptr::null()
                };
                let mut events: [libc::kevent; MAX_POLL_EVENTS] = std::mem::zeroed();

                let n = kevent(
                    self.kq,
                    std::ptr::null(),
                    0,
                    events.as_mut_ptr(),
                    events.len() as c_int,
                    timeout_ptr,
                );
                let n = Self::check_wait(n)?;
                for ev in &events[..n] {
                    if ev.filter == EVFILT_TIMER {
                        fired.push(ev.ident as u64);
                    }
                }
                Ok(n)
            }
        }

        #[cfg(target_os = "linux")]
        {
            unsafe {
                let mut events = [epoll_event { events: 0, u64: 0 }; MAX_POLL_EVENTS];
                let timeout = if timeout_ms >= 0 { timeout_ms } else { -1 };
                let n = epoll_wait(
                    self.epfd,
                    events.as_mut_ptr(),
                    events.len() as c_int,
                    timeout,
                );
                let n = Self::check_wait(n)?;

                for ev in &events[..n] {
                    let id = ev.u64;
                    if let Some(&fd) = self.timer_fds.get(&id) {
                        // Drain the expiration count so the fd is no longer readable;
                        // several missed expirations collapse into one tick
                        let mut expirations: u64 = 0;
                        libc::read(
                            fd,
                            &mut expirations as *mut u64 as *mut libc::c_void,
                            std::mem::size_of::<u64>(),
                        );
                        fired.push(id);
                    }
                }
                Ok(n)
            }
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = (fired, timeout_ms);
            Err(CountdownError::SchedulerError(
                "Unsupported platform".to_string(),
            ))
        }
    }

    #[cfg(target_os = "macos")]
    fn change(&self, kev: &libc::kevent, what: &str) -> Result<()> {
        unsafe {
            if kevent(
                self.kq,
                kev as *const libc::kevent,
                1,
                std::ptr::null_mut(),
                0,
                std::ptr::null(),
            ) < 0
            {
                return Err(CountdownError::SchedulerError(format!(
                    "Failed to {} {}: {}",
                    what,
                    kev.ident,
                    io::Error::last_os_error()
                )));
            }
        }
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn close_timer_fd(epfd: RawFd, fd: RawFd) {
        unsafe {
            let _ = epoll_ctl(epfd, EPOLL_CTL_DEL, fd, std::ptr::null_mut());
            libc::close(fd);
        }
    }

    #[cfg(any(target_os = "macos", target_os = "linux"))]
    fn check_wait(n: c_int) -> Result<usize> {
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(0);
            }
            return Err(CountdownError::SchedulerError(format!(
                "Failed to wait for events: {}",
                err
            )));
        }
        Ok(n as usize)
    }

    pub fn as_raw_fd(&self) -> RawFd {
        #[cfg(target_os = "macos")]
        {
            self.kq
        }

        #[cfg(target_os = "linux")]
        {
            self.epfd
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            -1
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        #[cfg(target_os = "linux")]
        {
            for (_, fd) in self.timer_fds.drain() {
                Self::close_timer_fd(self.epfd, fd);
            }
        }

        #[cfg(any(target_os = "macos", target_os = "linux"))]
        {
            unsafe {
                libc::close(self.as_raw_fd());
            }
        }
    }
}
