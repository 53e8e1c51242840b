//! Canned text served by the simulated shell.

/// Working directory of a fresh session
pub const HOME_DIR: &str = "/home/yflong";

pub const USER_NAME: &str = "yflong";

/// Printed by `whoami`
pub const DISPLAY_NAME: &str = "Yunfeng Long";

pub const HELP_TEXT: &str = "Available commands:
  help          - Show this help message
  ls [options]  - List directory contents (-l for detailed, -la for all)
  pwd           - Print working directory
  cd <dir>      - Change directory (.. for parent, ~ for home)
  cat <file>    - Display file contents
  whoami        - Display current user
  date          - Show current date and time
  uname [-a]    - System information (-a for all)
  ps            - Show running processes
  clear         - Clear terminal
  history       - Show command history
  echo <text>   - Display text
  mkdir <dir>   - Create directory
  touch <file>  - Create empty file
  rm <file>     - Remove file
  tree          - Show directory tree
  neofetch      - System information display
  uptime        - Show system uptime
  df            - Show disk usage
  free          - Show memory usage
  top           - Show system processes
  exit          - Close terminal session";

const BASHRC: &str = r#"# ~/.bashrc: executed by bash(1) for non-login shells.

export PATH=$HOME/bin:/usr/local/bin:$PATH
export EDITOR=vim
export BROWSER=firefox

# Aliases
alias ll='ls -alF'
alias la='ls -A'
alias l='ls -CF'
alias grep='grep --color=auto'
alias ..='cd ..'
alias ...='cd ../..'

# Custom prompt
PS1='\[\033[01;37m\]\u@\h\[\033[00m\]:\[\033[01;37m\]\w\[\033[00m\]\$ '

# History settings
HISTCONTROL=ignoreboth
HISTSIZE=1000
HISTFILESIZE=2000"#;

/// Content for `cat`, keyed by bare file name regardless of directory
pub fn file_content(name: &str) -> Option<&'static str> {
    let content = match name {
        ".bashrc" => BASHRC,
        "README.md" => {
            "Full Stack, GUI, Web development, Automation, ML, Data integration, BB & etc."
        }
        "mail.txt" => "teur@yflong.dev",
        "pypi.whl" => "https://pypi.org/user/ivuxy",
        "source-code.txt" => "https://github.com/yunfenglong/yflong.dev",
        "config.py" => "class Production(Config): LOGGER = True",
        "notes.txt" => "Stay focused on OWASP & Web Security",
        _ => return None,
    };
    Some(content)
}

/// Shown by `cat` for files that exist in a listing but have no content entry
pub fn unauthorized_placeholder(name: &str) -> String {
    format!(
        "File contents of {name}...\n\
         Welcome to yflong's secure terminal.\n\
         You are not authorized to view this file.\n\
         Try 'sudo' or contact the person who own this file."
    )
}

pub const PS: &str = "    PID TTY          TIME CMD
   1234 pts/0    00:00:01 bash
   5678 pts/0    00:00:03 node
   9012 pts/0    00:00:02 python3
   3456 pts/0    00:00:01 code
   7890 pts/0    00:00:00 docker
   2468 pts/0    00:00:00 ps";

pub const FREE: &str = "               total        used        free      shared  buff/cache   available
Mem:        33554432    8456789    13456789      123456    11640854    24097643
Swap:        2097152          0     2097152";

pub const DF: &str = "Filesystem     1K-blocks      Used Available Use% Mounted on
/dev/sda1       98566400  45678901  47887499  49% /
/dev/sda2        1048576    123456    925120  12% /boot
tmpfs           16777216         0  16777216   0% /dev/shm
tmpfs           16777216      1234  16775982   1% /run";

pub const UNAME: &str = "Linux";

pub const UNAME_ALL: &str = "Linux yflong-procrastination-station
1.9.9-beta-rc42-duct-tape #40~22.04.1-Arch-BTW 
AGGRESSIVE_GARBAGE_COLLECTION Way Past 
Thu Nov 16 10:53:04 UTC 2023 x86_64 x86_64 x86_64 GNU/Plus/A-Dash-Of-Systemd";

pub const NEOFETCH: &str = r#"                   -`                    yflong@workstation
                  .o+`                   ------------------
                 `ooo/                   OS: Ubuntu 22.04.3 LTS x86_64
                `+oooo:                  Host: Professional Workstation
               `+oooooo:                 Kernel: 6.2.0-39-generic
               -+oooooo+:                Uptime: 7 days, 14 hours, 23 mins
             `/:-:++oooo+:               Packages: 2847 (dpkg), 63 (snap)
            `/++++/+++++++:              Shell: bash 5.1.16
           `/++++++++++++++:             Resolution: 3840x2160
          `/+++ooooooooooooo/`           DE: GNOME 42.9
         ./ooosssso++osssssso+`          WM: Mutter
        .oossssso-````/ossssss+`         WM Theme: Adwaita
       -osssssso.      :ssssssso.        Theme: Yaru-blue [GTK2/3]
      :osssssss/        osssso+++.       Icons: Yaru [GTK2/3]
     /ossssssss/        +ssssooo/-       Terminal: gnome-terminal
   `/ossssso+/:-        -:/+osssso+-     CPU: Intel i7-12700K (20) @ 5.000GHz
  `+sso+:-`                 `.-/+oso:    GPU: NVIDIA GeForce RTX 4080
 `++:.                           `-/+/   Memory: 8456MiB / 32768MiB
 .`                                 `/"#;

pub fn top(time: &str) -> String {
    format!(
        "top - {time} up 7 days, 14:23, 1 user, load average: 0.52, 0.58, 0.59
Tasks: 312 total,   1 running, 311 sleeping,   0 stopped,   0 zombie
%Cpu(s):  3.2 us,  1.1 sy,  0.0 ni, 95.4 id,  0.3 wa,  0.0 hi,  0.0 si,  0.0 st
MiB Mem :  32768.0 total,  12847.2 free,   8234.1 used,  11686.7 buff/cache
MiB Swap:   2048.0 total,   2048.0 free,      0.0 used.  23456.8 avail Mem

    PID USER      PR  NI    VIRT    RES    SHR S  %CPU  %MEM     TIME+ COMMAND
   1234 yflong     20   0 1234567  123456  12345 S   5.2   0.4   1:23.45 node
   5678 yflong     20   0  987654   98765   9876 S   3.1   0.3   0:45.67 python3
   9012 yflong     20   0  654321   65432   6543 S   1.8   0.2   0:23.45 code"
    )
}

pub fn uptime(time: &str) -> String {
    format!(" {time} up 7 days, 14:23, 1 user, load average: 0.52, 0.58, 0.59")
}

/// Only the first line follows the working directory; the body always
/// draws the home layout.
pub fn tree(current_dir: &str) -> String {
    format!(
        "{current_dir}
├── projects/
│   ├── web-app/
│   ├── ffuf-force/
│   └── worker.js
├── documents/
│   ├── notes.txt
│   └── contracts/
├── downloads/
│   ├── ubuntu-22.04.iso
│   └── node-v18.tar.gz
├── pypi.whl
├── config.py
├── mail.txt
├── source-code.txt
├── .bashrc
└── README.md

6 directories, 8 files"
    )
}
