use colored::Colorize;

const LOGO: &str = r"
#######   ###     ###   #######   ###         ###   #######   ######
###       ###     ###   ###       ###   ###   ###   ###       ###  ###
#######   ###     ###   #######   ###  ### ## ###   ######    ######
    ###   ###     ###   ###       ### ###  ### ###   ###       ###  ###
#######    #######     #######    #####      #####   #######   ######

   ####      ######    #######   ######    ###   #######
  ### ###   ###        ###       ###  ###  ###     ###
 #########  ######     ######    ###  ###  ###     ###
###     ### ###        ###       ###  ###  ###     ###
###     ### #######    #######   ######    ###     ###
";

pub const COMMANDS: &str = "Доступные команды:
/q - Выход из чата
/web [URL] [ЗАПРОС] - Анализ содержимого веб-страницы
/c_web [URL1,URL2,...] - Загрузить страницы в контекст
/s_web [ЗАПРОС] - Поиск информации в интернете
/md_web [URL] - Извлечь контент в markdown и добавить в контекст
/ctx - Показать страницы в контексте
/help - Показать этот список
После загрузки контекста можно общаться напрямую по содержимому страниц";

pub fn print_welcome(model: &str) {
    println!("{}", LOGO.cyan());
    println!("{} {}", "Модель:".dimmed(), model.dimmed());
    println!();
    println!("{COMMANDS}");
    println!("Чем могу помочь?");
}
